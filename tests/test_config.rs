use alien_invaders::config::Config;
use alien_invaders::error::GameError;

#[test]
fn default_is_valid() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn ship_spawns_centered_above_bottom() {
    assert_eq!(Config::default().ship_spawn(), (400.0, 54.0));
}

#[test]
fn zero_bolt_rate_rejected() {
    let config = Config { bolt_rate: 0, ..Config::default() };
    assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
}

#[test]
fn empty_grid_rejected() {
    let config = Config { aliens_in_row: 0, ..Config::default() };
    assert!(config.validate().is_err());
}

#[test]
fn non_positive_speed_rejected() {
    let config = Config { alien_speed: 0.0, ..Config::default() };
    assert!(config.validate().is_err());
    let config = Config { bolt_speed: f64::NAN, ..Config::default() };
    assert!(config.validate().is_err());
}

#[test]
fn single_frame_sprite_rejected() {
    let config = Config { ship_frames: 1, ..Config::default() };
    assert!(config.validate().is_err());
}

#[test]
fn defense_line_outside_play_area_rejected() {
    let config = Config { defense_line: 900.0, ..Config::default() };
    assert!(config.validate().is_err());
}
