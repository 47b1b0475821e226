//! Tests for scenario loading and initial conditions

use std::path::PathBuf;
use vdwsim_core::scenario::{build_initial_state, grid_positions, seeded_rng, uniform_velocities};
use vdwsim_core::{build_simulation, Error, ScenarioConfig, VdwPotential};

fn test_data_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(filename);
    path
}

#[test]
fn test_load_small_grid() {
    let config = ScenarioConfig::load(test_data_path("small_grid.yaml")).expect("Failed to load");
    assert_eq!(config.grid.particle_count(), Some(9));
    assert_eq!(config.velocity.seed, Some(1234));
    assert_eq!(config.integration.reports, 20);
    assert_eq!(config.potential, VdwPotential::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_bad_spacing_fails_validation() {
    let config = ScenarioConfig::load(test_data_path("bad_spacing.yaml")).expect("Failed to load");
    assert!(matches!(config.validate(), Err(Error::InvalidParam(_))));
    assert!(build_simulation(&config).is_err());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ScenarioConfig::load(test_data_path("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_empty_grid_rejected() {
    let config = ScenarioConfig::from_yaml_str("grid:\n  rows: 0\n").unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_oversized_grid_rejected() {
    // rows * cols does not fit in usize
    let config =
        ScenarioConfig::from_yaml_str("grid:\n  rows: 4294967296\n  cols: 4294967296\n").unwrap();
    assert_eq!(config.grid.particle_count(), None);
    assert!(matches!(config.validate(), Err(Error::InvalidParam(_))));
    assert!(matches!(build_simulation(&config), Err(Error::InvalidParam(_))));
    assert!(matches!(
        grid_positions(usize::MAX, 2, 1.0),
        Err(Error::InvalidParam(_))
    ));
}

#[test]
fn test_speed_with_infinite_range_rejected() {
    // Finite bound, but the sampled interval is wider than f64::MAX
    let config =
        ScenarioConfig::from_yaml_str("velocity:\n  max_speed: 1.0e308\n  seed: 1\n").unwrap();
    assert!(matches!(config.validate(), Err(Error::InvalidParam(_))));
    assert!(matches!(build_simulation(&config), Err(Error::InvalidParam(_))));

    let mut rng = seeded_rng(Some(1));
    assert!(matches!(
        uniform_velocities(4, 1.0e308, &mut rng),
        Err(Error::InvalidParam(_))
    ));
}

#[test]
fn test_negative_speed_rejected() {
    let config = ScenarioConfig::from_yaml_str("velocity:\n  max_speed: -1.0\n").unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_grid_layout_matches_row_col_indexing() {
    let positions = grid_positions(2, 3, 0.5).unwrap();
    assert_eq!(positions.len(), 6);
    // particle i = col + row * cols sits at (row, col) * spacing
    let i = 2 + 3; // row 1, col 2
    assert_eq!(positions[i].x, 0.5);
    assert_eq!(positions[i].y, 1.0);
    assert_eq!(positions[1].x, 0.0);
    assert_eq!(positions[1].y, 0.5);
}

#[test]
fn test_uniform_velocities_within_bounds() {
    let mut rng = seeded_rng(Some(3));
    let velocities = uniform_velocities(500, 0.01, &mut rng).unwrap();
    assert_eq!(velocities.len(), 500);
    for v in &velocities {
        assert!(v.x.abs() <= 0.01 && v.y.abs() <= 0.01);
    }
    // Not all identical
    assert!(velocities.iter().any(|v| *v != velocities[0]));
}

#[test]
fn test_zero_speed_gives_rest() {
    let mut rng = seeded_rng(None);
    let velocities = uniform_velocities(4, 0.0, &mut rng).unwrap();
    assert!(velocities.iter().all(|v| *v == glam::DVec2::ZERO));
}

#[test]
fn test_seed_controls_initial_state() {
    let config = ScenarioConfig::load(test_data_path("small_grid.yaml")).unwrap();
    let a = build_initial_state(&config).unwrap();
    let b = build_initial_state(&config).unwrap();
    assert_eq!(a, b);

    let mut other = config.clone();
    other.velocity.seed = Some(4321);
    let c = build_initial_state(&other).unwrap();
    assert_eq!(a.positions(), c.positions());
    assert_ne!(a.velocities(), c.velocities());
}
