use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{Context, Result};
use vesiopas::{BoatPosition, Outcome, Tracker};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ReplayArgs) -> Result<()> {
    let settings = super::load_settings(cli)?;
    let (areas, signs) = super::load_data(cli, &args.data, &settings.extract)?;

    let tracker = Tracker::new(settings.tracker, settings.filters);
    tracker.load(areas, signs);

    let file = File::open(&args.samples)
        .with_context(|| format!("[replay] failed to open {}", args.samples.display()))?;

    let (mut evaluated, mut throttled) = (0usize, 0usize);
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sample: BoatPosition = serde_json::from_str(&line)
            .with_context(|| format!("[replay] line {}: invalid position sample", number + 1))?;

        match tracker.on_position(sample) {
            Outcome::Evaluated(evaluation) => {
                evaluated += 1;
                super::evaluate::print_summary(&evaluation);
            }
            Outcome::Throttled => {
                throttled += 1;
                if cli.verbose > 0 {
                    eprintln!("[replay] line {}: throttled", number + 1);
                }
            }
            Outcome::Idle => {}
        }
    }

    eprintln!("[replay] {evaluated} evaluated, {throttled} throttled");
    Ok(())
}
