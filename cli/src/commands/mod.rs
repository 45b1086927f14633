pub mod evaluate;
pub mod export;
pub mod inspect;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use vesiopas::{extract_path, DatasetKind, ExtractOptions, RestrictionArea, Settings, TrafficSign};

use crate::cli::{Cli, DataArgs};

/// Settings from `--settings`, or the defaults.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    match &cli.settings {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("[settings] failed to read {}", path.display())),
        None => Ok(Settings::default()),
    }
}

fn load(path: &Path, kind: DatasetKind, options: &ExtractOptions) -> Result<vesiopas::Dataset> {
    extract_path(path, kind, options)
        .with_context(|| format!("[{kind}] failed to decode {}", path.display()))
}

/// Decode both datasets named on the command line.
pub fn load_data(cli: &Cli, data: &DataArgs, options: &ExtractOptions) -> Result<(Vec<RestrictionArea>, Vec<TrafficSign>)> {
    let areas = load(&data.areas, DatasetKind::Restriction, options)?.into_restrictions().unwrap_or_default();
    let signs = load(&data.signs, DatasetKind::Sign, options)?.into_signs().unwrap_or_default();
    if cli.verbose > 0 {
        eprintln!("[load] {} restriction areas, {} traffic signs", areas.len(), signs.len());
    }
    Ok((areas, signs))
}
