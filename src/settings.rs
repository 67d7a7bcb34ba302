use std::env;
use std::path::PathBuf;

use crate::calibration::CalibrationConfig;
use crate::persist::default_calibration_path;

const DEFAULT_FIXTURES_PATH: &str = "data/fixtures.json";

/// Runtime settings for the binaries. The library itself never reads the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub fixtures_path: PathBuf,
    /// `None` means "latest played week".
    pub target_week: Option<u32>,
    pub calibration_out: Option<PathBuf>,
    pub calibration: CalibrationConfig,
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = CalibrationConfig::default();
        Self {
            fixtures_path: opt_env("LIGUE1_FIXTURES")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURES_PATH)),
            target_week: opt_env("TARGET_WEEK").and_then(|val| val.trim().parse::<u32>().ok()),
            calibration_out: opt_env("CALIBRATION_OUT")
                .map(PathBuf::from)
                .or_else(default_calibration_path),
            calibration: CalibrationConfig {
                min_games: opt_env("CALIBRATION_MIN_GAMES")
                    .and_then(|val| val.trim().parse::<u32>().ok())
                    .unwrap_or(defaults.min_games)
                    .max(1),
                min_factor: opt_env("CALIBRATION_MIN_FACTOR")
                    .and_then(|val| val.trim().parse::<f64>().ok())
                    .filter(|v| v.is_finite() && *v > 0.0)
                    .unwrap_or(defaults.min_factor)
                    .min(1.0),
                max_factor: opt_env("CALIBRATION_MAX_FACTOR")
                    .and_then(|val| val.trim().parse::<f64>().ok())
                    .filter(|v| v.is_finite())
                    .unwrap_or(defaults.max_factor)
                    .clamp(1.0, 3.0),
            },
        }
    }

    /// Command-line flags win over the environment.
    pub fn apply_args(&mut self, args: &[String]) {
        if let Some(path) = flag_value(args, "--fixtures") {
            self.fixtures_path = PathBuf::from(path);
        }
        if let Some(week) = flag_value(args, "--week").and_then(|v| v.parse::<u32>().ok()) {
            self.target_week = Some(week);
        }
        if let Some(path) = flag_value(args, "--out") {
            self.calibration_out = Some(PathBuf::from(path));
        }
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|val| if val.trim().is_empty() { None } else { Some(val) })
}

/// Accepts both `--flag value` and `--flag=value`.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(rest) = arg.strip_prefix(flag) {
            if let Some(value) = rest.strip_prefix('=') {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            } else if rest.is_empty() {
                let Some(next) = args.get(idx + 1) else {
                    continue;
                };
                if !next.trim().is_empty() {
                    return Some(next.trim().to_string());
                }
            }
        }
    }
    None
}
