use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use subcast::{CondenseOptions, ExtractiveSummarizer, TimestampedSegment};

#[derive(Parser)]
#[command(
    name = "subcast",
    about = "Convert raw podcast transcripts to SRT subtitles and chapter markers"
)]
struct Cli {
    /// Transcript file to read, or "-" for stdin.
    input: String,

    /// Output format.
    #[arg(short, long, default_value = "srt")]
    format: OutputFormat,

    /// Write output to file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the detected transcript format and exit.
    #[arg(long)]
    detect: bool,

    /// Condense the transcript into key moments instead of converting it.
    #[arg(long)]
    condense: bool,

    /// Pick chapter markers instead of converting.
    #[arg(long)]
    chapters: bool,

    /// Segments per condensation window.
    #[arg(long, default_value = "50")]
    window_size: usize,

    /// Fractional overlap between adjacent windows.
    #[arg(long, default_value = "0.2")]
    overlap: f64,

    /// Minimum seconds between condensed segments.
    #[arg(long, default_value_t = subcast::DEDUP_MIN_GAP_SECS)]
    min_gap: f64,

    /// Maximum number of chapter markers.
    #[arg(long, default_value = "20")]
    max_markers: usize,

    /// Fraction of each window the built-in summarizer keeps.
    #[arg(long, default_value = "0.2")]
    keep_ratio: f64,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Srt,
    Vtt,
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("subcast=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw = if cli.input == "-" {
        let mut buf = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
            eprintln!("Error reading stdin: {e}");
            std::process::exit(1);
        }
        buf
    } else {
        match std::fs::read_to_string(&cli.input) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading {}: {e}", cli.input);
                std::process::exit(1);
            }
        }
    };

    if cli.detect {
        println!("{}", subcast::detect_format(&raw));
        return;
    }

    let output_text = if cli.condense || cli.chapters {
        let segments = match subcast::extract_segments(&raw) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        };

        let options = CondenseOptions::new()
            .window_size(cli.window_size)
            .overlap(cli.overlap);
        let summarizer = ExtractiveSummarizer::new().keep_ratio(cli.keep_ratio);

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("valid template"),
        );
        pb.set_message(format!("Condensing {} segments", segments.len()));
        pb.enable_steady_tick(Duration::from_millis(100));

        let result = if cli.chapters {
            subcast::chapter_candidates(&segments, &options, &summarizer, cli.max_markers).await
        } else {
            subcast::condense(&segments, &options, &summarizer)
                .await
                .map(|merged| subcast::enforce_min_spacing(&merged, cli.min_gap))
        };
        pb.finish_and_clear();

        let markers = match result {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        };

        eprintln!("Kept {} of {} segments", markers.len(), segments.len());

        render_segments(&markers, &cli.format)
    } else {
        let doc = match subcast::parse_transcript(&raw) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        };

        eprintln!("Parsed {} cues from {} transcript", doc.cues.len(), doc.format);

        match cli.format {
            OutputFormat::Srt => doc.to_srt(),
            OutputFormat::Vtt => doc.to_vtt(),
            OutputFormat::Text => doc.text(),
            OutputFormat::Json => match doc.to_json_pretty() {
                Ok(j) => j,
                Err(e) => {
                    eprintln!("JSON error: {e}");
                    std::process::exit(1);
                }
            },
        }
    };

    match cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, &output_text) {
                eprintln!("Error writing to {}: {e}", path.display());
                std::process::exit(1);
            }
            eprintln!("Written to {}", path.display());
        }
        None => print!("{output_text}"),
    }
}

fn render_segments(segments: &[TimestampedSegment], format: &OutputFormat) -> String {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(segments) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("JSON error: {e}");
                std::process::exit(1);
            }
        },
        _ => segments
            .iter()
            .map(|s| format!("{}\t{}\n", s.timestamp, s.text))
            .collect(),
    }
}
