use anyhow::{anyhow, Result};
use chrono::Utc;
use vesiopas::{evaluate_position, parse_timestamp, BoatPosition, Evaluation, SpatialIndex};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::EvaluateArgs) -> Result<()> {
    let settings = super::load_settings(cli)?;
    let (areas, signs) = super::load_data(cli, &args.data, &settings.extract)?;
    let index = SpatialIndex::build(areas, signs);

    let now = match &args.at {
        Some(text) => parse_timestamp(text).ok_or_else(|| anyhow!("[evaluate] invalid --at time {text:?}"))?,
        None => Utc::now(),
    };
    let position = BoatPosition::new(args.lat, args.lng, now.timestamp_millis());
    let evaluation = evaluate_position(&index, &position, &settings.filters, &settings.tracker, now);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        print_summary(&evaluation);
    }
    Ok(())
}

/// Human-readable listing of one evaluation.
pub fn print_summary(evaluation: &Evaluation) {
    let position = &evaluation.position;
    println!("position {:.5}, {:.5} at {}", position.latitude, position.longitude, evaluation.evaluated_at);

    if evaluation.restrictions.is_empty() {
        println!("  no restrictions");
    }
    for restriction in &evaluation.restrictions {
        let marker = if restriction.is_primary { '*' } else { ' ' };
        println!("  {marker} {} (#{})", restriction.label(), restriction.id);
    }

    for sign in &evaluation.signs {
        println!("    {:>8}  {} (#{}, {})", sign.distance_label(), sign.display_name(), sign.id, sign.icon_url);
    }
}
