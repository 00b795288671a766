/// All game entity types: pure data plus geometry accessors, no game logic.

use serde::{Deserialize, Serialize};

use crate::settings::{DynamicSettings, Settings};
use crate::stats::GameStats;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// An RGB colour triple, written as `[r, g, b]` in config files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Axis-aligned rectangle in game units.  `x`/`y` are the top-left corner,
/// with `y` growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Strict overlap: rectangles that merely share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

// ── Fleet direction ───────────────────────────────────────────────────────────

/// Horizontal heading shared by every alien in the fleet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FleetDirection {
    Right,
    Left,
}

impl FleetDirection {
    /// +1.0 for right, −1.0 for left.
    pub fn sign(self) -> f32 {
        match self {
            FleetDirection::Right => 1.0,
            FleetDirection::Left => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            FleetDirection::Right => FleetDirection::Left,
            FleetDirection::Left => FleetDirection::Right,
        }
    }
}

// ── Player ship ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    /// Horizontal centre (continuous).
    pub center_x: f32,
    /// Top edge; fixed baseline for the whole game.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// A ship at the bottom centre of the screen with no movement intent.
    pub fn centered(settings: &Settings) -> Self {
        Ship {
            center_x: settings.screen.width / 2.0,
            y: settings.screen.height - settings.ship.height,
            width: settings.ship.width,
            height: settings.ship.height,
            moving_left: false,
            moving_right: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.center_x - self.width / 2.0, self.y, self.width, self.height)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bullet {
    /// Spawn a bullet centred on the ship's nose (its top edge).
    pub fn from_ship(ship: &Ship, settings: &Settings) -> Self {
        let width = settings.bullet.width;
        Bullet {
            x: ship.center_x - width / 2.0,
            y: ship.y,
            width,
            height: settings.bullet.height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Aliens ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Alien {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state.  Cloneable so the pure update functions in
/// `compute` can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub settings: Settings,
    pub dynamic: DynamicSettings,
    pub stats: GameStats,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub aliens: Vec<Alien>,
}

// ── Render view ───────────────────────────────────────────────────────────────

/// Everything the renderer needs for one frame, in game units.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub screen_width: f32,
    pub screen_height: f32,
    pub bg_color: Rgb,
    pub ship: Rect,
    pub bullets: Vec<Rect>,
    pub bullet_color: Rgb,
    pub aliens: Vec<Rect>,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub ships_left: u32,
    pub show_play_button: bool,
    pub stunned: bool,
}
