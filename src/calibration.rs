use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::fixtures::{Fixture, parse_score_pair};
use crate::team_names::normalize;

#[derive(Debug, Clone, Copy)]
pub struct CalibrationConfig {
    pub min_games: u32,
    pub min_factor: f64,
    pub max_factor: f64,
}

impl CalibrationConfig {
    /// Clamp bounds in ascending order. Non-finite bounds fall back to the defaults.
    fn bounds(&self) -> (f64, f64) {
        let defaults = Self::default();
        let lo = if self.min_factor.is_finite() {
            self.min_factor
        } else {
            defaults.min_factor
        };
        let hi = if self.max_factor.is_finite() {
            self.max_factor
        } else {
            defaults.max_factor
        };
        (lo.min(hi), lo.max(hi))
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            min_games: 3,
            min_factor: 0.7,
            max_factor: 1.3,
        }
    }
}

/// Multipliers the score model applies to a team's expected goals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamCalibration {
    pub attack: f64,
    pub defense: f64,
    pub games: u32,
}

impl TeamCalibration {
    pub fn neutral(games: u32) -> Self {
        Self {
            attack: 1.0,
            defense: 1.0,
            games,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    games: u32,
    predicted_for: f64,
    predicted_against: f64,
    actual_for: f64,
    actual_against: f64,
}

impl Totals {
    fn add(&mut self, predicted: (u16, u16), actual: (u16, u16)) {
        self.games += 1;
        self.predicted_for += f64::from(predicted.0);
        self.predicted_against += f64::from(predicted.1);
        self.actual_for += f64::from(actual.0);
        self.actual_against += f64::from(actual.1);
    }
}

pub fn compute_calibration(fixtures: &[Fixture]) -> HashMap<String, TeamCalibration> {
    compute_calibration_with(fixtures, &CalibrationConfig::default())
}

/// Compares what the model predicted for finished fixtures with what happened.
///
/// Only finished fixtures whose prediction score parses take part, and a fixture id
/// counts once, at its first occurrence. Every team in `fixtures` gets an entry;
/// teams under `min_games` samples stay neutral.
pub fn compute_calibration_with(
    fixtures: &[Fixture],
    cfg: &CalibrationConfig,
) -> HashMap<String, TeamCalibration> {
    let mut totals: HashMap<String, Totals> = HashMap::new();
    for f in fixtures {
        totals.entry(normalize(&f.home_team)).or_default();
        totals.entry(normalize(&f.away_team)).or_default();
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for f in fixtures {
        if !seen.insert(f.id.as_str()) {
            continue;
        }
        let Some(actual) = f.final_score() else {
            continue;
        };
        let Some((ph, pa)) = f
            .prediction
            .as_ref()
            .and_then(|p| p.score.as_deref())
            .and_then(parse_score_pair)
        else {
            continue;
        };
        let home = normalize(&f.home_team);
        let away = normalize(&f.away_team);
        if home == away {
            log::debug!("fixture {} skipped: both sides are {home}", f.id);
            continue;
        }
        if let Some(t) = totals.get_mut(&home) {
            t.add((ph, pa), (actual.home, actual.away));
        }
        if let Some(t) = totals.get_mut(&away) {
            t.add((pa, ph), (actual.away, actual.home));
        }
    }

    totals
        .into_iter()
        .map(|(team, t)| {
            let factors = if t.games < cfg.min_games {
                TeamCalibration::neutral(t.games)
            } else {
                TeamCalibration {
                    attack: clamped_ratio(t.actual_for, t.predicted_for, cfg),
                    defense: clamped_ratio(t.actual_against, t.predicted_against, cfg),
                    games: t.games,
                }
            };
            (team, factors)
        })
        .collect()
}

fn clamped_ratio(actual: f64, predicted: f64, cfg: &CalibrationConfig) -> f64 {
    if predicted <= 0.0 {
        return 1.0;
    }
    let (lo, hi) = cfg.bounds();
    let ratio = actual / predicted;
    if ratio.is_nan() {
        return 1.0;
    }
    ratio.clamp(lo, hi)
}
