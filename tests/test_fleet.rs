use alien_invasion::entities::{Alien, FleetDirection};
use alien_invasion::fleet::*;
use alien_invasion::settings::Settings;

fn settings_800x600() -> Settings {
    let mut s = Settings::default();
    s.screen.width = 800.0;
    s.screen.height = 600.0;
    s.ship.height = 60.0;
    s.alien.width = 40.0;
    s.alien.height = 40.0;
    s
}

fn alien_at(x: f32, y: f32) -> Alien {
    Alien { x, y, width: 40.0, height: 40.0 }
}

// ── Grid sizing ───────────────────────────────────────────────────────────────

#[test]
fn rows_and_columns_800x600() {
    let s = settings_800x600();
    // floor((600 − 120 − 60) / 80) = 5
    assert_eq!(get_number_rows(&s, 60.0, 40.0), 5);
    // floor((800 − 80) / 80) = 9
    assert_eq!(get_number_aliens(&s, 40.0), 9);
}

#[test]
fn rows_and_columns_default_screen() {
    let s = Settings::default(); // 1200x800, ship h 48, alien 60x58
    assert_eq!(get_number_rows(&s, 48.0, 58.0), 4); // 578 / 116
    assert_eq!(get_number_aliens(&s, 60.0), 9); // 1080 / 120
}

#[test]
fn no_room_gives_zero_not_negative() {
    let mut s = settings_800x600();
    s.screen.height = 100.0;
    s.screen.width = 50.0;
    assert_eq!(get_number_rows(&s, 60.0, 40.0), 0);
    assert_eq!(get_number_aliens(&s, 40.0), 0);
    assert!(layout(&s, 60.0, 40.0, 40.0).is_empty());
}

// ── Layout ────────────────────────────────────────────────────────────────────

#[test]
fn layout_800x600_has_45_aliens_on_grid() {
    let s = settings_800x600();
    let grid = layout(&s, 60.0, 40.0, 40.0);
    assert_eq!(grid.len(), 45);

    assert_eq!(grid[0], (40.0, 40.0));
    assert_eq!(grid[1], (120.0, 40.0));
    assert_eq!(grid[8], (680.0, 40.0)); // last in first row
    assert_eq!(grid[9], (40.0, 120.0)); // first in second row
    assert_eq!(grid[44], (680.0, 360.0));
}

#[test]
fn layout_origins_never_overlap() {
    let s = settings_800x600();
    let fleet: Vec<Alien> = layout(&s, 60.0, 40.0, 40.0)
        .into_iter()
        .map(|(x, y)| alien_at(x, y))
        .collect();
    for (i, a) in fleet.iter().enumerate() {
        for b in fleet.iter().skip(i + 1) {
            assert!(!a.rect().intersects(&b.rect()), "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn create_fleet_uses_configured_sizes() {
    let s = settings_800x600();
    let fleet = create_fleet(&s);
    assert_eq!(fleet.len(), 45);
    assert!(fleet.iter().all(|a| a.width == 40.0 && a.height == 40.0));
    assert!(fleet.iter().all(|a| !touches_edge(a, s.screen.width)));
}

// ── Edges ─────────────────────────────────────────────────────────────────────

#[test]
fn touches_edge_left_and_right() {
    assert!(touches_edge(&alien_at(0.0, 10.0), 800.0));
    assert!(touches_edge(&alien_at(-3.0, 10.0), 800.0));
    assert!(touches_edge(&alien_at(760.0, 10.0), 800.0)); // right == width
    assert!(!touches_edge(&alien_at(759.0, 10.0), 800.0));
    assert!(!touches_edge(&alien_at(1.0, 10.0), 800.0));
}

#[test]
fn one_alien_at_edge_flips_once_and_drops_all() {
    let s = settings_800x600(); // drop_speed 10
    let fleet = vec![alien_at(100.0, 40.0), alien_at(760.0, 40.0), alien_at(300.0, 120.0)];

    let (dropped, dir) = check_fleet_edges(&fleet, FleetDirection::Right, &s);
    assert_eq!(dir, FleetDirection::Left);
    let ys: Vec<f32> = dropped.iter().map(|a| a.y).collect();
    assert_eq!(ys, vec![50.0, 50.0, 130.0]);
    // x untouched
    assert_eq!(dropped[1].x, 760.0);
}

#[test]
fn several_aliens_at_edges_still_single_reversal() {
    let s = settings_800x600();
    let fleet = vec![alien_at(0.0, 40.0), alien_at(760.0, 40.0), alien_at(770.0, 80.0)];
    let (dropped, dir) = check_fleet_edges(&fleet, FleetDirection::Left, &s);
    assert_eq!(dir, FleetDirection::Right);
    assert!(dropped.iter().zip(&fleet).all(|(d, f)| d.y == f.y + 10.0));
}

#[test]
fn no_edge_contact_leaves_fleet_alone() {
    let s = settings_800x600();
    let fleet = vec![alien_at(100.0, 40.0), alien_at(400.0, 40.0)];
    let (same, dir) = check_fleet_edges(&fleet, FleetDirection::Right, &s);
    assert_eq!(dir, FleetDirection::Right);
    assert_eq!(same, fleet);
}

#[test]
fn change_direction_on_empty_fleet_still_flips() {
    let (aliens, dir) = change_fleet_direction(&[], FleetDirection::Right, 10.0);
    assert!(aliens.is_empty());
    assert_eq!(dir, FleetDirection::Left);
}
