pub mod compute;
pub mod display;
pub mod entities;
pub mod fleet;
pub mod highscore;
pub mod input;
pub mod settings;
pub mod stats;
