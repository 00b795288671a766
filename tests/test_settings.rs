use std::io::Write;

use alien_invasion::entities::{FleetDirection, Rgb};
use alien_invasion::settings::*;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write tmp");
    file
}

// ── Defaults & loading ────────────────────────────────────────────────────────

#[test]
fn defaults_match_classic_tuning() {
    let s = Settings::default();
    assert_eq!((s.screen.width, s.screen.height), (1200.0, 800.0));
    assert_eq!(s.screen.bg_color, Rgb(230, 230, 230));
    assert_eq!(s.ship.limit, 3);
    assert_eq!(s.bullet.allowed, 3);
    assert_eq!(s.alien.points, 50);
    assert_eq!(s.difficulty.hit_pause_ms, 500);
    assert!(s.validate().is_empty(), "defaults warn: {:?}", s.validate());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let file = write_temp(
        r#"
        [screen]
        width = 800.0
        bg_color = [0, 0, 0]

        [bullet]
        allowed = 5
        "#,
    );
    let s = Settings::load_from_file(file.path()).expect("parse settings");
    assert_eq!(s.screen.width, 800.0);
    assert_eq!(s.screen.height, 800.0);
    assert_eq!(s.screen.bg_color, Rgb(0, 0, 0));
    assert_eq!(s.bullet.allowed, 5);
    assert_eq!(s.bullet.speed, BulletSettings::default().speed);
    assert_eq!(s.alien, AlienSettings::default());
}

#[test]
fn sample_config_parses() {
    let s: Settings = toml::from_str(include_str!("../settings.example.toml"))
        .expect("sample settings parse");
    assert!(s.validate().is_empty(), "sample warns: {:?}", s.validate());
}

#[test]
fn load_or_default_missing_file() {
    let (s, err) = Settings::load_or_default("this/file/does/not/exist.toml");
    assert!(err.is_some());
    assert_eq!(s, Settings::default());
}

#[test]
fn load_or_default_bad_toml() {
    let file = write_temp("[screen\nwidth = ");
    let (s, err) = Settings::load_or_default(file.path());
    assert!(err.unwrap().contains("parse TOML"));
    assert_eq!(s, Settings::default());
}

#[test]
fn validate_detects_warnings() {
    let mut s = Settings::default();
    s.screen.width = 100.0; // narrower than two aliens: no fleet fits
    s.bullet.allowed = 0;
    s.difficulty.speedup_scale = 0.9;
    s.difficulty.score_scale = 0.5;

    let warnings = s.validate();
    let joined = warnings.join(" | ");
    assert!(joined.contains("bullet.allowed is 0"));
    assert!(joined.contains("speedup_scale"));
    assert!(joined.contains("score_scale"));
    assert!(joined.contains("fits no fleet"));
    assert_eq!(warnings.len(), 4, "{joined}");
}

#[test]
fn validate_flags_points_that_saturate_the_score() {
    let mut s = Settings::default();
    s.alien.points = 3_000_000_000;
    let warnings = s.validate();
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("alien.points"));
    assert!(Settings::default().validate().is_empty());
}

// ── Dynamic settings ──────────────────────────────────────────────────────────

#[test]
fn reset_to_base_copies_base_values() {
    let s = Settings::default();
    let d = DynamicSettings::reset_to_base(&s);
    assert_eq!(d.ship_speed, 1.5);
    assert_eq!(d.bullet_speed, 3.0);
    assert_eq!(d.alien_speed, 1.0);
    assert_eq!(d.alien_points, 50);
    assert_eq!(d.fleet_direction, FleetDirection::Right);
}

#[test]
fn scale_up_multiplies_speeds_and_points() {
    let d = DynamicSettings::reset_to_base(&Settings::default());
    let up = d.scale_up(2.0, 1.5);
    assert_eq!(up.ship_speed, 3.0);
    assert_eq!(up.bullet_speed, 6.0);
    assert_eq!(up.alien_speed, 2.0);
    assert_eq!(up.alien_points, 75);
    // 75 * 1.5 = 112.5 → truncated
    assert_eq!(up.scale_up(1.0, 1.5).alien_points, 112);
}

#[test]
fn scale_up_caps_points_at_max() {
    let mut d = DynamicSettings::reset_to_base(&Settings::default());
    d.alien_points = 3_000_000_000;
    assert_eq!(d.scale_up(1.1, 1.5).alien_points, u32::MAX);
    d.alien_points = u32::MAX;
    assert_eq!(d.scale_up(1.1, 1.5).alien_points, u32::MAX);
}

#[test]
fn scale_up_keeps_heading_and_original() {
    let mut d = DynamicSettings::reset_to_base(&Settings::default());
    d.fleet_direction = FleetDirection::Left;
    let up = d.scale_up(1.1, 1.5);
    assert_eq!(up.fleet_direction, FleetDirection::Left);
    assert_eq!(d.alien_points, 50);
}
