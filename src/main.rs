//! wavegen: periodic waveform synthesizer.
//!
//! `wavegen <wave-type> <frequency> <output-name>` writes `<output-name>.wav`.
//! `wavegen --combine FIRST SECOND [--into NAME]` mixes two WAV files.

use wavegen::audio::combine;
use wavegen::cli::{Cli, Command};
use wavegen::error::Result;
use wavegen::generation::{output_path, synthesize};
use wavegen::types::RenderReport;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let report = match cli.command()? {
        Command::Generate {
            wave_type,
            frequency,
            output,
        } => synthesize(&wave_type, &frequency, &output, &cli.synth_config())?,
        Command::Combine {
            first,
            second,
            output,
        } => combine(&first, &second, &output_path(&output))?,
    };

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

/// Prints a short description of the written file.
fn print_summary(report: &RenderReport) {
    eprintln!("{}", summary_line(report));
}

fn summary_line(report: &RenderReport) -> String {
    let name = report.path.display();
    match report.frequency_hz {
        Some(frequency) => format!(
            "Wrote {} ({} at {} Hz, {} frames, {} ch, {} Hz, {}-bit)",
            name,
            report.source,
            frequency,
            report.frame_count,
            report.channels,
            report.sample_rate,
            report.bits_per_sample
        ),
        None => format!(
            "Files combined successfully into {} ({} frames)",
            name, report.frame_count
        ),
    }
}
