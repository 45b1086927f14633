use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use vesiopas::extract_path;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ExportArgs) -> Result<()> {
    let settings = super::load_settings(cli)?;
    let kind = args.kind.into();

    let dataset = extract_path(&args.gpkg, kind, &settings.extract)
        .with_context(|| format!("[export] failed to decode {}", args.gpkg.display()))?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("[export] failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    serde_json::to_writer_pretty(&mut out, &dataset).context("[export] failed to write JSON")?;
    writeln!(out)?;
    out.flush()?;

    if cli.verbose > 0 {
        eprintln!("[export] wrote {} {kind} features", dataset.len());
    }
    Ok(())
}
