use std::path::PathBuf;

/// Waterway restriction and sign lookup over GeoPackage data
#[derive(clap::Parser, Debug)]
#[command(name = "vesiopas", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings JSON (filters, tracker, extract)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Summarize a GeoPackage dataset
    Inspect(InspectArgs),

    /// Decode a dataset and write its features as JSON
    Export(ExportArgs),

    /// Evaluate a single position
    Evaluate(EvaluateArgs),

    /// Feed position samples (JSON lines) through the tracker
    Replay(ReplayArgs),
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Kind {
    Restriction,
    Sign,
}

impl From<Kind> for vesiopas::DatasetKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Restriction => vesiopas::DatasetKind::Restriction,
            Kind::Sign => vesiopas::DatasetKind::Sign,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// GeoPackage file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub gpkg: PathBuf,

    /// Dataset stored in the file
    #[arg(short, long, value_enum)]
    pub kind: Kind,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// GeoPackage file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub gpkg: PathBuf,

    /// Dataset stored in the file
    #[arg(short, long, value_enum)]
    pub kind: Kind,

    /// Output JSON file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Dataset locations shared by `evaluate` and `replay`.
#[derive(clap::Args, Debug)]
pub struct DataArgs {
    /// Restriction GeoPackage (rajoitusalue_a)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub areas: PathBuf,

    /// Sign GeoPackage (vesiliikennemerkit)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub signs: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Latitude in WGS84 degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in WGS84 degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// Evaluation time (RFC 3339 or a plain date), defaults to now
    #[arg(long)]
    pub at: Option<String>,

    /// Print the evaluation as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// JSON lines of position samples, e.g. {"latitude":60.1,"longitude":24.9,"timestampMs":0}
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub samples: PathBuf,
}
