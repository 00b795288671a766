use alien_invasion::compute::init_state;
use alien_invasion::entities::*;
use alien_invasion::settings::Settings;

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.left(), 10.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.top(), 20.0);
    assert_eq!(r.bottom(), 60.0);
    assert_eq!(r.center_x(), 25.0);
}

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let touching = Rect::new(10.0, 0.0, 10.0, 10.0); // shares the right edge
    let overlapping = Rect::new(9.0, 9.0, 10.0, 10.0);
    let apart = Rect::new(50.0, 50.0, 1.0, 1.0);

    assert!(!a.intersects(&touching));
    assert!(a.intersects(&overlapping));
    assert!(overlapping.intersects(&a));
    assert!(!a.intersects(&apart));
}

#[test]
fn rect_contains_point_half_open() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains_point(0.0, 0.0));
    assert!(r.contains_point(9.9, 9.9));
    assert!(!r.contains_point(10.0, 5.0));
    assert!(!r.contains_point(5.0, -0.1));
}

// ── FleetDirection ────────────────────────────────────────────────────────────

#[test]
fn fleet_direction_sign_and_reverse() {
    assert_eq!(FleetDirection::Right.sign(), 1.0);
    assert_eq!(FleetDirection::Left.sign(), -1.0);
    assert_eq!(FleetDirection::Right.reversed(), FleetDirection::Left);
    assert_eq!(FleetDirection::Left.reversed().reversed(), FleetDirection::Left);
}

// ── Ship & bullet spawn ───────────────────────────────────────────────────────

#[test]
fn ship_centered_at_bottom() {
    let settings = Settings::default(); // 1200x800, ship 60x48
    let ship = Ship::centered(&settings);
    assert_eq!(ship.center_x, 600.0);
    assert_eq!(ship.rect().bottom(), 800.0);
    assert_eq!(ship.rect().left(), 570.0);
    assert!(!ship.moving_left && !ship.moving_right);
}

#[test]
fn bullet_spawns_on_ship_nose() {
    let settings = Settings::default(); // bullet 3x15
    let ship = Ship::centered(&settings);
    let b = Bullet::from_ship(&ship, &settings);
    assert_eq!(b.rect().center_x(), ship.center_x);
    assert_eq!(b.y, ship.y);
    assert_eq!(b.width, 3.0);
    assert_eq!(b.height, 15.0);
}

// ── GameState ─────────────────────────────────────────────────────────────────

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(Settings::default(), 0);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.ship.center_x = 99.0;
    cloned.stats.score = 999;
    cloned.aliens.clear();

    assert_eq!(original.ship.center_x, 600.0);
    assert_eq!(original.stats.score, 0);
    assert!(!original.aliens.is_empty());
}
