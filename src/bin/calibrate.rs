use anyhow::{Context, Result};

use ligue1_table::calibration::compute_calibration_with;
use ligue1_table::fixtures::load_fixtures;
use ligue1_table::persist::{CalibrationExport, save_calibration};
use ligue1_table::settings::Settings;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let mut settings = Settings::from_env();
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    settings.apply_args(&args);

    let fixtures = load_fixtures(&settings.fixtures_path).context("unable to load fixtures")?;
    let factors = compute_calibration_with(&fixtures, &settings.calibration);

    let mut rows = factors.iter().collect::<Vec<_>>();
    rows.sort_by(|a, b| a.0.cmp(b.0));

    println!("Calibration from {} fixtures", fixtures.len());
    println!("{:<16} {:>5} {:>7} {:>7}", "Team", "Games", "Attack", "Defense");
    for (team, cal) in &rows {
        println!(
            "{:<16} {:>5} {:>7.3} {:>7.3}",
            team, cal.games, cal.attack, cal.defense
        );
    }
    let calibrated = rows
        .iter()
        .filter(|(_, c)| c.games >= settings.calibration.min_games)
        .count();
    if calibrated == 0 {
        eprintln!(
            "[WARN] no team has {} finished fixtures with a prediction; all factors are neutral",
            settings.calibration.min_games
        );
    }

    let Some(out) = settings.calibration_out else {
        eprintln!("[WARN] no output path (set CALIBRATION_OUT or pass --out); nothing saved");
        return Ok(());
    };
    save_calibration(&out, &CalibrationExport::new(factors))?;
    println!("Saved: {}", out.display());

    Ok(())
}
