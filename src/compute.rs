/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where timing matters, the current `Instant`) and returns a
/// brand-new `GameState`.  Time is injected so callers control determinism.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::entities::{Alien, Bullet, GameState, Scene, Ship};
use crate::fleet;
use crate::input::Action;
use crate::settings::{DynamicSettings, Settings};
use crate::stats::GameStats;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Process-start state: inactive, a fleet on screen behind the Play button.
pub fn init_state(settings: Settings, high_score: u32) -> GameState {
    GameState {
        dynamic: DynamicSettings::reset_to_base(&settings),
        stats: GameStats::new(settings.ship.limit, high_score),
        ship: Ship::centered(&settings),
        bullets: Vec::new(),
        aliens: fleet::create_fleet(&settings),
        settings,
    }
}

/// Inactive → Active.  Ignored while a game is already running.
pub fn start_game(state: &GameState) -> GameState {
    if state.stats.game_active {
        return state.clone();
    }

    let mut stats = state.stats.clone();
    stats.reset(state.settings.ship.limit);
    stats.game_active = true;
    info!(ships = stats.ships_left, high_score = stats.high_score, "new game");

    GameState {
        dynamic: DynamicSettings::reset_to_base(&state.settings),
        stats,
        ship: recentered(&state.ship, &state.settings),
        bullets: Vec::new(),
        aliens: fleet::create_fleet(&state.settings),
        ..state.clone()
    }
}

/// Move the ship back to the bottom centre.  Held movement keys stay held.
fn recentered(ship: &Ship, settings: &Settings) -> Ship {
    Ship {
        moving_left: ship.moving_left,
        moving_right: ship.moving_right,
        ..Ship::centered(settings)
    }
}

// ── Input-driven state transitions ───────────────────────────────────────────

pub fn key_down(state: &GameState, action: Action, now: Instant) -> GameState {
    match action {
        Action::MoveLeft => GameState {
            ship: Ship { moving_left: true, ..state.ship.clone() },
            ..state.clone()
        },
        Action::MoveRight => GameState {
            ship: Ship { moving_right: true, ..state.ship.clone() },
            ..state.clone()
        },
        Action::Fire if state.stats.game_active && !state.stats.is_stunned(now) => {
            fire_bullet(state)
        }
        Action::Start => start_game(state),
        // Quit-and-save is handled by the frame loop, which owns persistence.
        Action::Fire | Action::QuitAndSave => state.clone(),
    }
}

pub fn key_up(state: &GameState, action: Action) -> GameState {
    match action {
        Action::MoveLeft => GameState {
            ship: Ship { moving_left: false, ..state.ship.clone() },
            ..state.clone()
        },
        Action::MoveRight => GameState {
            ship: Ship { moving_right: false, ..state.ship.clone() },
            ..state.clone()
        },
        _ => state.clone(),
    }
}

/// Fire a bullet from the ship, unless the live-bullet cap is reached.
pub fn fire_bullet(state: &GameState) -> GameState {
    if state.bullets.len() >= state.settings.bullet.allowed {
        return state.clone();
    }
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet::from_ship(&state.ship, &state.settings));
    GameState {
        bullets,
        ..state.clone()
    }
}

// ── Entity motion ────────────────────────────────────────────────────────────

/// Apply movement intent, keeping the whole ship on screen.
pub fn move_ship(ship: &Ship, speed: f32, screen_width: f32) -> Ship {
    let mut dx = 0.0;
    if ship.moving_right {
        dx += speed;
    }
    if ship.moving_left {
        dx -= speed;
    }
    let half = ship.width / 2.0;
    let center_x = (ship.center_x + dx).min(screen_width - half).max(half);
    Ship { center_x, ..ship.clone() }
}

pub fn move_bullet(bullet: &Bullet, speed: f32) -> Bullet {
    Bullet { y: bullet.y - speed, ..bullet.clone() }
}

pub fn move_alien(alien: &Alien, speed: f32, direction_sign: f32) -> Alien {
    Alien { x: alien.x + speed * direction_sign, ..alien.clone() }
}

// ── Per-frame steps ──────────────────────────────────────────────────────────

pub fn update_ship(state: &GameState) -> GameState {
    GameState {
        ship: move_ship(&state.ship, state.dynamic.ship_speed, state.settings.screen.width),
        ..state.clone()
    }
}

/// Advance bullets, drop the ones fully above the screen, then resolve hits.
pub fn update_bullets(state: &GameState) -> GameState {
    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .map(|b| move_bullet(b, state.dynamic.bullet_speed))
        .filter(|b| b.rect().bottom() > 0.0)
        .collect();

    check_bullet_alien_collisions(&GameState {
        bullets,
        ..state.clone()
    })
}

/// Remove every bullet and alien that overlap, award points, and start the
/// next level when the fleet is gone.
///
/// Hits are computed for all pairs first and applied once, so a bullet that
/// overlaps two aliens destroys both and an alien hit by two bullets is only
/// scored once.
pub fn check_bullet_alien_collisions(state: &GameState) -> GameState {
    let mut bullet_hit = vec![false; state.bullets.len()];
    let mut alien_hit = vec![false; state.aliens.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let rect = bullet.rect();
        for (ai, alien) in state.aliens.iter().enumerate() {
            if rect.intersects(&alien.rect()) {
                bullet_hit[bi] = true;
                alien_hit[ai] = true;
            }
        }
    }

    let destroyed = alien_hit.iter().filter(|&&hit| hit).count() as u32;

    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .zip(&bullet_hit)
        .filter(|(_, hit)| !**hit)
        .map(|(b, _)| b.clone())
        .collect();

    let aliens: Vec<Alien> = state
        .aliens
        .iter()
        .zip(&alien_hit)
        .filter(|(_, hit)| !**hit)
        .map(|(a, _)| a.clone())
        .collect();

    let mut stats = state.stats.clone();
    if destroyed > 0 {
        // Saturating: the score pins at u32::MAX rather than wrapping.
        let gained = state.dynamic.alien_points.saturating_mul(destroyed);
        stats.score = stats.score.saturating_add(gained);
        stats.check_high_score();
    }

    if !aliens.is_empty() {
        return GameState {
            stats,
            bullets,
            aliens,
            ..state.clone()
        };
    }

    // Fleet cleared: next level.
    stats.level += 1;
    let dynamic = state.dynamic.scale_up(
        state.settings.difficulty.speedup_scale,
        state.settings.difficulty.score_scale,
    );
    info!(
        level = stats.level,
        score = stats.score,
        alien_points = dynamic.alien_points,
        "fleet cleared"
    );

    GameState {
        dynamic,
        stats,
        bullets: Vec::new(),
        aliens: fleet::create_fleet(&state.settings),
        ..state.clone()
    }
}

/// Edge check, fleet motion, then ship collision and bottom breach.  At most
/// one `ship_hit` per frame.
pub fn update_aliens(state: &GameState, now: Instant) -> GameState {
    let (aliens, direction) =
        fleet::check_fleet_edges(&state.aliens, state.dynamic.fleet_direction, &state.settings);
    if direction != state.dynamic.fleet_direction {
        debug!(?direction, "fleet reversed");
    }

    let aliens: Vec<Alien> = aliens
        .iter()
        .map(|a| move_alien(a, state.dynamic.alien_speed, direction.sign()))
        .collect();

    let ship_rect = state.ship.rect();
    let screen_bottom = state.settings.screen.height;
    let rammed = aliens.iter().any(|a| a.rect().intersects(&ship_rect));
    let landed = aliens.iter().any(|a| a.rect().bottom() >= screen_bottom);

    let next = GameState {
        dynamic: DynamicSettings {
            fleet_direction: direction,
            ..state.dynamic
        },
        aliens,
        ..state.clone()
    };

    if rammed || landed {
        ship_hit(&next, now)
    } else {
        next
    }
}

/// Lose a ship: with ships to spare, clear the board, rebuild the fleet and
/// pause; with none left, end the game.
pub fn ship_hit(state: &GameState, now: Instant) -> GameState {
    let mut stats = state.stats.clone();

    if stats.ships_left == 0 {
        stats.game_active = false;
        stats.resume_at = None;
        info!(score = stats.score, level = stats.level, "game over");
        return GameState {
            stats,
            ..state.clone()
        };
    }

    stats.ships_left -= 1;
    stats.resume_at = Some(now + Duration::from_millis(state.settings.difficulty.hit_pause_ms));
    debug!(ships_left = stats.ships_left, "ship hit");

    GameState {
        stats,
        ship: recentered(&state.ship, &state.settings),
        bullets: Vec::new(),
        aliens: fleet::create_fleet(&state.settings),
        ..state.clone()
    }
}

/// Advance the simulation by one frame.  Does nothing while inactive or
/// inside the post-hit pause.
pub fn tick(state: &GameState, now: Instant) -> GameState {
    if !state.stats.game_active || state.stats.is_stunned(now) {
        return state.clone();
    }

    let mut resumed = state.clone();
    resumed.stats.resume_at = None;

    let next = update_ship(&resumed);
    let next = update_bullets(&next);
    update_aliens(&next, now)
}

// ── Render projection ────────────────────────────────────────────────────────

pub fn scene(state: &GameState, now: Instant) -> Scene {
    Scene {
        screen_width: state.settings.screen.width,
        screen_height: state.settings.screen.height,
        bg_color: state.settings.screen.bg_color,
        ship: state.ship.rect(),
        bullets: state.bullets.iter().map(Bullet::rect).collect(),
        bullet_color: state.settings.bullet.color,
        aliens: state.aliens.iter().map(Alien::rect).collect(),
        score: state.stats.score,
        high_score: state.stats.high_score,
        level: state.stats.level,
        ships_left: state.stats.ships_left,
        show_play_button: !state.stats.game_active,
        stunned: state.stats.is_stunned(now),
    }
}
