use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::info;
use walkbass::{BassError, Progression};

/// Output format for the rendered progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Plain tab text
    Text,
    /// Tab columns as JSON
    Columns,
    /// Audio scheduler records as JSON
    Playback,
}

/// Render a chord progression as a walking bass line in bass tab
#[derive(Parser, Debug)]
#[command(name = "walkbass")]
#[command(version)]
struct Args {
    /// Progression file (YAML)
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Override the progression's tempo
    #[arg(long)]
    bpm: Option<f64>,

    /// Print beat numbers under the tab
    #[arg(long)]
    beats: bool,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let source = match fs::read_to_string(&args.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let rendered = match render(&source, &args) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &rendered) {
                eprintln!("Error writing to '{}': {}", path.display(), e);
                process::exit(1);
            }
            eprintln!("Wrote {:?} output to {}", args.format, path.display());
        }
        None => print!("{}", rendered),
    }
}

fn render(source: &str, args: &Args) -> Result<String, BassError> {
    let mut progression = Progression::from_yaml(source)?;
    if let Some(bpm) = args.bpm {
        progression = progression.with_tempo(bpm)?;
    }
    if args.beats {
        let options = walkbass::Options {
            beat_numbers: true,
            ..progression.options().clone()
        };
        progression = progression.with_options(options)?;
    }

    info!(
        key = %progression.key(),
        chords = progression.chords().len(),
        tempo = progression.options().tempo,
        "loaded progression"
    );

    match args.format {
        Format::Text => {
            let mut text = progression.tab_text()?;
            if !text.ends_with('\n') {
                text.push('\n');
            }
            Ok(text)
        }
        Format::Columns => to_json(&progression.columns()?),
        Format::Playback => to_json(&progression.playback()?),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, BassError> {
    serde_json::to_string_pretty(value)
        .map(|json| json + "\n")
        .map_err(|e| BassError::ProgressionError(format!("JSON serialization error: {}", e)))
}
