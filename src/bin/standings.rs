use anyhow::{Context, Result};

use ligue1_table::fixtures::load_fixtures;
use ligue1_table::settings::Settings;
use ligue1_table::standings::{compute_standings, last_week, latest_played_week};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let mut settings = Settings::from_env();
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    settings.apply_args(&args);

    let fixtures = load_fixtures(&settings.fixtures_path).context("unable to load fixtures")?;
    if fixtures.is_empty() {
        eprintln!(
            "[WARN] no fixtures in {}",
            settings.fixtures_path.display()
        );
        return Ok(());
    }

    let season_end = last_week(&fixtures);
    let week = settings
        .target_week
        .unwrap_or_else(|| latest_played_week(&fixtures))
        .min(season_end);
    if settings.target_week.is_some_and(|w| w > season_end) {
        eprintln!("[WARN] week capped to {season_end}, the last week on the fixture list");
    }

    let table = compute_standings(&fixtures, week);

    println!("Standings after week {week}/{season_end}");
    println!(
        "{:>3}  {:<16} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}  Form",
        "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    for row in &table {
        println!(
            "{:>3}  {:<16} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+4} {:>4}  {}",
            row.rank,
            row.team,
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.goals_for,
            row.goals_against,
            row.goal_difference,
            row.points,
            row.recent_form_string()
        );
    }

    Ok(())
}
