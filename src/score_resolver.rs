//! Turns a model prediction into one coherent scoreline.
//!
//! The upstream predictor samples the exact score, the winner call and the
//! over/under call independently, so they can disagree. Priority is fixed:
//! winner first, goal line second, the raw numbers last. Each pass is a pure
//! function from one [`Score`] to the next.

use crate::fixtures::{Fixture, Prediction, Score, parse_score_pair};
use crate::team_names::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Home,
    Draw,
    Away,
}

impl Verdict {
    pub fn of(score: Score) -> Self {
        if score.home > score.away {
            Self::Home
        } else if score.home < score.away {
            Self::Away
        } else {
            Self::Draw
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalLine {
    Under,
    Over,
}

/// Resolves an unplayed fixture. Finished fixtures with a recorded score, fixtures
/// without a prediction, and predictions whose score does not parse yield `None`.
pub fn resolve_fixture(fixture: &Fixture) -> Option<Score> {
    if fixture.is_finished() {
        return None;
    }
    let prediction = fixture.prediction.as_ref()?;
    resolve_prediction(&fixture.home_team, &fixture.away_team, prediction)
}

pub fn resolve_prediction(home_team: &str, away_team: &str, prediction: &Prediction) -> Option<Score> {
    let (home, away) = parse_score_pair(prediction.score.as_deref()?)?;
    let raw = Score::new(home, away);

    let after_winner = match declared_verdict(home_team, away_team, prediction.winner.as_deref()) {
        Some(verdict) => apply_winner(raw, verdict)?,
        None => raw,
    };

    Some(match goal_line(prediction.goals_pred.as_deref()) {
        Some(line) => apply_goal_line(after_winner, line),
        None => after_winner,
    })
}

/// Reads the declared winner. Names that are neither side nor a draw marker give `None`.
pub fn declared_verdict(home_team: &str, away_team: &str, winner: Option<&str>) -> Option<Verdict> {
    let winner = winner?.trim();
    if winner.is_empty() {
        return None;
    }
    if winner.eq_ignore_ascii_case("draw") || winner.eq_ignore_ascii_case("nul") {
        return Some(Verdict::Draw);
    }
    let key = normalize(winner);
    if key == normalize(home_team) {
        Some(Verdict::Home)
    } else if key == normalize(away_team) {
        Some(Verdict::Away)
    } else {
        None
    }
}

/// Forces the score to agree with the declared winner. A draw call lifts both sides
/// to the higher raw value. `None` only on goal-count overflow.
pub fn apply_winner(score: Score, verdict: Verdict) -> Option<Score> {
    Some(match verdict {
        Verdict::Home if score.home <= score.away => Score::new(score.away.checked_add(1)?, score.away),
        Verdict::Away if score.away <= score.home => Score::new(score.home, score.home.checked_add(1)?),
        Verdict::Draw if score.home != score.away => {
            let level = score.home.max(score.away);
            Score::new(level, level)
        }
        _ => score,
    })
}

pub fn goal_line(tag: Option<&str>) -> Option<GoalLine> {
    let tag = tag?;
    if tag.contains("-2.5") {
        Some(GoalLine::Under)
    } else if tag.contains("+2.5") {
        Some(GoalLine::Over)
    } else {
        None
    }
}

/// Moves the score into the declared goal bucket without changing who wins.
pub fn apply_goal_line(score: Score, line: GoalLine) -> Score {
    let verdict = Verdict::of(score);
    match line {
        GoalLine::Under if score.total() > 2 => match verdict {
            Verdict::Home => Score::new(1, 0),
            Verdict::Away => Score::new(0, 1),
            Verdict::Draw => Score::new(1, 1),
        },
        GoalLine::Over if score.total() < 3 => match verdict {
            Verdict::Home => Score::new(2, 1),
            Verdict::Away => Score::new(1, 2),
            Verdict::Draw => Score::new(2, 2),
        },
        _ => score,
    }
}
