/// Alien fleet layout and edge handling.
///
/// The grid leaves one alien-width gap between columns and one alien-height
/// gap between rows, with the same margin on the left and top edges.  Three
/// alien-heights plus the ship's height are kept free above the bottom of the
/// screen.

use crate::entities::{Alien, FleetDirection};
use crate::settings::Settings;

/// How many rows of aliens fit above the ship.
pub fn get_number_rows(settings: &Settings, ship_height: f32, alien_height: f32) -> usize {
    let available_space_y = settings.screen.height - 3.0 * alien_height - ship_height;
    fit_count(available_space_y, 2.0 * alien_height)
}

/// How many aliens fit across one row.
pub fn get_number_aliens(settings: &Settings, alien_width: f32) -> usize {
    let available_space_x = settings.screen.width - 2.0 * alien_width;
    fit_count(available_space_x, 2.0 * alien_width)
}

fn fit_count(available: f32, pitch: f32) -> usize {
    if available <= 0.0 || pitch <= 0.0 {
        return 0;
    }
    (available / pitch).floor() as usize
}

/// Top-left origins of every alien in a full fleet, row by row.
pub fn layout(
    settings: &Settings,
    ship_height: f32,
    alien_height: f32,
    alien_width: f32,
) -> Vec<(f32, f32)> {
    let rows = get_number_rows(settings, ship_height, alien_height);
    let per_row = get_number_aliens(settings, alien_width);

    (0..rows)
        .flat_map(|row| {
            (0..per_row).map(move |column| {
                (
                    alien_width * (1.0 + 2.0 * column as f32),
                    alien_height * (1.0 + 2.0 * row as f32),
                )
            })
        })
        .collect()
}

/// Build a complete fleet sized from the configured ship and alien dimensions.
pub fn create_fleet(settings: &Settings) -> Vec<Alien> {
    let width = settings.alien.width;
    let height = settings.alien.height;
    layout(settings, settings.ship.height, height, width)
        .into_iter()
        .map(|(x, y)| Alien { x, y, width, height })
        .collect()
}

pub fn touches_edge(alien: &Alien, screen_width: f32) -> bool {
    let rect = alien.rect();
    rect.left() <= 0.0 || rect.right() >= screen_width
}

/// If any alien touches a screen edge, drop the whole fleet and reverse its
/// heading.  At most one reversal per call, however many aliens touch.
pub fn check_fleet_edges(
    aliens: &[Alien],
    direction: FleetDirection,
    settings: &Settings,
) -> (Vec<Alien>, FleetDirection) {
    if aliens.iter().any(|a| touches_edge(a, settings.screen.width)) {
        change_fleet_direction(aliens, direction, settings.alien.drop_speed)
    } else {
        (aliens.to_vec(), direction)
    }
}

/// Move every alien down by `drop_speed` and flip the heading.
pub fn change_fleet_direction(
    aliens: &[Alien],
    direction: FleetDirection,
    drop_speed: f32,
) -> (Vec<Alien>, FleetDirection) {
    let dropped = aliens
        .iter()
        .map(|a| Alien { y: a.y + drop_speed, ..a.clone() })
        .collect();
    (dropped, direction.reversed())
}
