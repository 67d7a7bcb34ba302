use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixtureStatus {
    Scheduled,
    Finished,
    /// Postponed, in play, timed... anything without a final result yet.
    Other,
}

impl FixtureStatus {
    pub fn from_label(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "FINISHED" | "FT" | "AWARDED" => Self::Finished,
            "SCHEDULED" => Self::Scheduled,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u16,
    pub away: u16,
}

impl Score {
    pub fn new(home: u16, away: u16) -> Self {
        Self { home, away }
    }

    pub fn total(&self) -> u32 {
        u32::from(self.home) + u32::from(self.away)
    }
}

/// Output of the external score model for one unplayed fixture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// "H-A", e.g. "2-1".
    pub score: Option<String>,
    /// A raw team name, or "Draw" / "Nul".
    pub winner: Option<String>,
    /// Free-form tag; only "+2.5" / "-2.5" inside it matter.
    pub goals_pred: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub week: u32,
    pub status: FixtureStatus,
    pub score: Option<Score>,
    pub prediction: Option<Prediction>,
}

impl Fixture {
    /// The recorded result, only for finished fixtures that actually carry one.
    pub fn final_score(&self) -> Option<Score> {
        if self.status == FixtureStatus::Finished {
            self.score
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.final_score().is_some()
    }
}

pub fn load_fixtures(path: &Path) -> Result<Vec<Fixture>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read fixtures from {}", path.display()))?;
    parse_fixtures_json(&raw).with_context(|| format!("parse fixtures in {}", path.display()))
}

pub fn parse_fixtures_json(raw: &str) -> Result<Vec<Fixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let v: Value = serde_json::from_str(trimmed).context("invalid fixtures json")?;

    let items = if let Some(arr) = v.as_array() {
        arr
    } else if let Some(arr) = v
        .get("matches")
        .or_else(|| v.get("fixtures"))
        .and_then(|x| x.as_array())
    {
        arr
    } else {
        return Err(anyhow::anyhow!(
            "fixtures json must be an array or carry `matches`/`fixtures`"
        ));
    };

    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match parse_fixture(item) {
            Some(fixture) => out.push(fixture),
            None => log::debug!("dropping fixture #{idx}: missing teams or week"),
        }
    }
    Ok(out)
}

fn parse_fixture(v: &Value) -> Option<Fixture> {
    let home_team = team_name(v.get("homeTeam")?)?;
    let away_team = team_name(v.get("awayTeam")?)?;
    let week = v
        .get("week")
        .or_else(|| v.get("matchday"))
        .and_then(as_u64_lenient)
        .and_then(|w| u32::try_from(w).ok())?;

    let status = v
        .get("status")
        .and_then(|x| x.as_str())
        .map(FixtureStatus::from_label)
        .unwrap_or(FixtureStatus::Other);

    let score = v.get("score").and_then(parse_score);

    let id = match v.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("{home_team}|{away_team}|{week}"),
    };

    let prediction = v.get("prediction").and_then(|p| {
        if !p.is_object() {
            return None;
        }
        Some(Prediction {
            score: opt_str(p.get("score")),
            winner: opt_str(p.get("winner")),
            goals_pred: opt_str(p.get("goals_pred")),
        })
    });

    Some(Fixture {
        id,
        home_team,
        away_team,
        week,
        status,
        score,
        prediction,
    })
}

fn team_name(v: &Value) -> Option<String> {
    let name = match v {
        Value::String(s) => s.as_str(),
        Value::Object(_) => v
            .get("name")
            .and_then(|x| x.as_str())
            .filter(|s| !s.trim().is_empty())
            .or_else(|| v.get("shortName").and_then(|x| x.as_str()))?,
        _ => return None,
    };
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_score(v: &Value) -> Option<Score> {
    // football-data style nests the result under fullTime.
    let node = v.get("fullTime").unwrap_or(v);
    let home = node.get("home").and_then(as_u64_lenient)?;
    let away = node.get("away").and_then(as_u64_lenient)?;
    Some(Score::new(
        u16::try_from(home).ok()?,
        u16::try_from(away).ok()?,
    ))
}

fn as_u64_lenient(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn opt_str(v: Option<&Value>) -> Option<String> {
    v.and_then(|x| x.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Parses "H-A" into a goal pair. Anything other than exactly two non-negative
/// integers around a single dash is rejected.
pub fn parse_score_pair(raw: &str) -> Option<(u16, u16)> {
    let (home, away) = raw.trim().split_once('-')?;
    let home = home.trim();
    let away = away.trim();
    if home.is_empty()
        || away.is_empty()
        || !home.chars().all(|c| c.is_ascii_digit())
        || !away.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    Some((home.parse().ok()?, away.parse().ok()?))
}
