use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fixtures::{Fixture, Score};
use crate::score_resolver::resolve_fixture;
use crate::team_names::normalize;

pub const FORM_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl FormResult {
    pub fn as_char(self) -> char {
        match self {
            Self::Win => 'W',
            Self::Draw => 'D',
            Self::Loss => 'L',
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Self::Win => 3,
            Self::Draw => 1,
            Self::Loss => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub rank: usize,
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    /// Every qualifying result, oldest first.
    pub form: Vec<FormResult>,
}

impl TeamStanding {
    fn new(team: String) -> Self {
        Self {
            rank: 0,
            team,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            form: Vec::new(),
        }
    }

    pub fn recent_form(&self) -> &[FormResult] {
        let start = self.form.len().saturating_sub(FORM_WINDOW);
        &self.form[start..]
    }

    pub fn recent_form_string(&self) -> String {
        self.recent_form().iter().map(|r| r.as_char()).collect()
    }

    fn record(&mut self, scored: u16, conceded: u16) {
        let result = if scored > conceded {
            FormResult::Win
        } else if scored < conceded {
            FormResult::Loss
        } else {
            FormResult::Draw
        };
        self.played += 1;
        self.goals_for += u32::from(scored);
        self.goals_against += u32::from(conceded);
        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;
        match result {
            FormResult::Win => self.won += 1,
            FormResult::Draw => self.drawn += 1,
            FormResult::Loss => self.lost += 1,
        }
        self.points += result.points();
        self.form.push(result);
    }
}

/// Builds the league table as it stands after `target_week`.
///
/// Finished fixtures count with their recorded score, unplayed ones through the
/// score resolver; fixtures the resolver rejects are left out entirely. Every team
/// named anywhere in `fixtures` is listed, even with nothing played yet. A fixture id
/// counts once, at its first occurrence in week order.
pub fn compute_standings(fixtures: &[Fixture], target_week: u32) -> Vec<TeamStanding> {
    let mut order: Vec<String> = Vec::new();
    let mut table: HashMap<String, TeamStanding> = HashMap::new();
    for f in fixtures {
        for name in [&f.home_team, &f.away_team] {
            let key = normalize(name);
            if !table.contains_key(&key) {
                order.push(key.clone());
                table.insert(key.clone(), TeamStanding::new(key));
            }
        }
    }

    let mut chronological: Vec<&Fixture> = fixtures.iter().collect();
    chronological.sort_by_key(|f| f.week);

    let mut seen: HashSet<&str> = HashSet::new();
    for f in chronological {
        if f.week > target_week {
            continue;
        }
        if !seen.insert(f.id.as_str()) {
            continue;
        }
        let Some(score) = final_goals(f) else {
            log::debug!("fixture {} excluded: no usable score", f.id);
            continue;
        };
        let home_key = normalize(&f.home_team);
        let away_key = normalize(&f.away_team);
        if home_key == away_key {
            log::debug!("fixture {} excluded: both sides are {home_key}", f.id);
            continue;
        }
        if let Some(home) = table.get_mut(&home_key) {
            home.record(score.home, score.away);
        }
        if let Some(away) = table.get_mut(&away_key) {
            away.record(score.away, score.home);
        }
    }

    let mut rows: Vec<TeamStanding> = order
        .into_iter()
        .filter_map(|key| table.remove(&key))
        .collect();
    // Stable: teams level on all three keys keep first-seen order.
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }
    rows
}

fn final_goals(fixture: &Fixture) -> Option<Score> {
    fixture.final_score().or_else(|| resolve_fixture(fixture))
}

/// Highest week number in the list, 0 when empty.
pub fn last_week(fixtures: &[Fixture]) -> u32 {
    fixtures.iter().map(|f| f.week).max().unwrap_or(0)
}

/// Highest week holding at least one finished fixture, 0 before the season starts.
pub fn latest_played_week(fixtures: &[Fixture]) -> u32 {
    fixtures
        .iter()
        .filter(|f| f.is_finished())
        .map(|f| f.week)
        .max()
        .unwrap_or(0)
}

/// One independent table per requested week, ascending by week.
pub fn standings_timeline(fixtures: &[Fixture], weeks: &[u32]) -> Vec<(u32, Vec<TeamStanding>)> {
    let mut weeks = weeks.to_vec();
    weeks.sort_unstable();
    weeks.dedup();
    weeks
        .into_par_iter()
        .map(|week| (week, compute_standings(fixtures, week)))
        .collect()
}

pub fn find_team<'a>(table: &'a [TeamStanding], name: &str) -> Option<&'a TeamStanding> {
    let key = normalize(name);
    table.iter().find(|row| row.team == key)
}
