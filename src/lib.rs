pub mod calibration;
pub mod fixtures;
pub mod persist;
pub mod score_resolver;
pub mod settings;
pub mod standings;
pub mod team_names;

pub use calibration::{CalibrationConfig, TeamCalibration, compute_calibration};
pub use fixtures::{Fixture, FixtureStatus, Prediction, Score};
pub use score_resolver::resolve_fixture;
pub use standings::{TeamStanding, compute_standings};
pub use team_names::normalize;
