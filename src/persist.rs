use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::calibration::TeamCalibration;

const CACHE_DIR: &str = "ligue1_table";
const CACHE_FILE: &str = "calibration.json";
const EXPORT_VERSION: u32 = 1;

/// What the score model reads back on its next run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalibrationExport {
    pub version: u32,
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub teams: HashMap<String, TeamCalibration>,
}

impl CalibrationExport {
    pub fn new(teams: HashMap<String, TeamCalibration>) -> Self {
        Self {
            version: EXPORT_VERSION,
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            teams,
        }
    }
}

pub fn save_calibration(path: &Path, export: &CalibrationExport) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(export).context("serialize calibration")?;
    fs::write(&tmp, json).context("write calibration")?;
    fs::rename(&tmp, path).context("swap calibration")?;
    Ok(())
}

/// Missing, unreadable or stale files all read as an empty export.
pub fn load_calibration(path: &Path) -> CalibrationExport {
    let Ok(raw) = fs::read_to_string(path) else {
        return CalibrationExport::default();
    };
    let Ok(export) = serde_json::from_str::<CalibrationExport>(&raw) else {
        return CalibrationExport::default();
    };
    if export.version != EXPORT_VERSION {
        return CalibrationExport::default();
    }
    export
}

pub fn default_calibration_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR).join(CACHE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("ligue1_table_{}_{name}", std::process::id()))
            .join(CACHE_FILE)
    }

    #[test]
    fn save_then_load_keeps_factors() {
        let path = scratch_path("roundtrip");
        let teams = HashMap::from([(
            "Lens".to_string(),
            TeamCalibration {
                attack: 1.3,
                defense: 0.85,
                games: 6,
            },
        )]);
        save_calibration(&path, &CalibrationExport::new(teams)).expect("save should work");
        let loaded = load_calibration(&path);
        assert_eq!(loaded.version, EXPORT_VERSION);
        assert_eq!(loaded.teams["Lens"].attack, 1.3);
        assert!(!path.with_extension("json.tmp").exists());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_or_stale_file_is_empty() {
        let path = scratch_path("stale");
        assert!(load_calibration(&path).teams.is_empty());

        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"version":99,"teams":{"Lens":{"attack":1.0,"defense":1.0,"games":3}}}"#)
            .unwrap();
        assert!(load_calibration(&path).teams.is_empty());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
