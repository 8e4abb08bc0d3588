//! Command-line argument parser.
//!
//! The main form is `wavegen <wave-type> <frequency> <output-name>`.
//! `--combine FIRST SECOND` replaces the positional arguments and mixes two
//! existing WAV files instead.

use std::path::PathBuf;

use clap::Parser;

use crate::audio::DEFAULT_COMBINED_NAME;
use crate::config::SynthConfig;
use crate::error::{Result, WavegenError};
use crate::types::AmplitudeMode;

/// wavegen: periodic waveform synthesizer
#[derive(Parser, Debug)]
#[command(name = "wavegen")]
#[command(about = "Synthesize sine, square, triangle and sawtooth waves into 16-bit PCM WAV files")]
#[command(version)]
pub struct Cli {
    /// Wave type: sine, square, triangle or sawtooth (case-insensitive)
    #[arg(required_unless_present = "combine")]
    pub wave_type: Option<String>,

    /// Frequency in Hz (non-negative)
    #[arg(required_unless_present = "combine", allow_hyphen_values = true)]
    pub frequency: Option<String>,

    /// Output file name; ".wav" is appended
    #[arg(required_unless_present = "combine")]
    pub output: Option<String>,

    /// Amplitude between 0.0 and 1.0 (values outside are clamped)
    #[arg(short, long, allow_hyphen_values = true)]
    pub amplitude: Option<f64>,

    /// Apply the amplitude to triangle and sawtooth waves as well
    #[arg(long)]
    pub scale_all_shapes: bool,

    /// Mix two WAV files instead of synthesizing
    #[arg(
        long,
        num_args = 2,
        value_names = ["FIRST", "SECOND"],
        conflicts_with_all = ["wave_type", "frequency", "output"]
    )]
    pub combine: Option<Vec<PathBuf>>,

    /// Output name for --combine; ".wav" is appended [default: Combined_Audio]
    #[arg(long)]
    pub into: Option<String>,

    /// Print the render report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// What a parsed command line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Synthesize a waveform into `<output>.wav`.
    Generate {
        wave_type: String,
        frequency: String,
        output: String,
    },
    /// Mix two files into `<output>.wav`.
    Combine {
        first: PathBuf,
        second: PathBuf,
        output: String,
    },
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Resolves the requested command.
    pub fn command(&self) -> Result<Command> {
        if let Some(files) = &self.combine {
            return match files.as_slice() {
                [first, second] => Ok(Command::Combine {
                    first: first.clone(),
                    second: second.clone(),
                    output: self
                        .into
                        .clone()
                        .unwrap_or_else(|| DEFAULT_COMBINED_NAME.to_string()),
                }),
                _ => Err(WavegenError::invalid_config("--combine takes exactly two files")),
            };
        }
        if self.into.is_some() {
            return Err(WavegenError::invalid_config("--into is only valid with --combine"));
        }

        match (&self.wave_type, &self.frequency, &self.output) {
            (Some(wave_type), Some(frequency), Some(output)) => Ok(Command::Generate {
                wave_type: wave_type.clone(),
                frequency: frequency.clone(),
                output: output.clone(),
            }),
            _ => Err(WavegenError::invalid_config("Incorrect amount of arguments")),
        }
    }

    /// Builds the render configuration from the options.
    pub fn synth_config(&self) -> SynthConfig {
        let mut config = SynthConfig::default();
        if let Some(amplitude) = self.amplitude {
            config = config.with_amplitude(amplitude);
        }
        if self.scale_all_shapes {
            config = config.with_amplitude_mode(AmplitudeMode::AllShapes);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("wavegen").chain(args.iter().copied()))
    }

    #[test]
    fn positional_form() {
        let cli = parse(&["sine", "440", "test"]).unwrap();
        assert_eq!(
            cli.command().unwrap(),
            Command::Generate {
                wave_type: "sine".to_string(),
                frequency: "440".to_string(),
                output: "test".to_string(),
            }
        );
        assert_eq!(cli.synth_config(), SynthConfig::default());
        assert!(!cli.json);
    }

    #[test]
    fn wrong_argument_counts_rejected() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["sine"]).is_err());
        assert!(parse(&["sine", "440"]).is_err());
        assert!(parse(&["sine", "440", "out", "extra"]).is_err());
        assert!(parse(&["sine", "440", "out", "extra", "more"]).is_err());
    }

    #[test]
    fn negative_frequency_reaches_validation() {
        let cli = parse(&["sine", "-440", "out"]).unwrap();
        match cli.command().unwrap() {
            Command::Generate { frequency, .. } => assert_eq!(frequency, "-440"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn amplitude_options() {
        let cli = parse(&["triangle", "220", "out", "--amplitude", "0.5", "--scale-all-shapes"])
            .unwrap();
        let config = cli.synth_config();
        assert_eq!(config.amplitude, 0.5);
        assert_eq!(config.amplitude_mode, AmplitudeMode::AllShapes);
    }

    #[test]
    fn combine_form() {
        let cli = parse(&["--combine", "a.wav", "b.wav"]).unwrap();
        assert_eq!(
            cli.command().unwrap(),
            Command::Combine {
                first: PathBuf::from("a.wav"),
                second: PathBuf::from("b.wav"),
                output: DEFAULT_COMBINED_NAME.to_string(),
            }
        );

        let cli = parse(&["--combine", "a.wav", "b.wav", "--into", "mix"]).unwrap();
        match cli.command().unwrap() {
            Command::Combine { output, .. } => assert_eq!(output, "mix"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn combine_conflicts_with_positional_form() {
        assert!(parse(&["sine", "440", "out", "--combine", "a.wav", "b.wav"]).is_err());
        assert!(parse(&["--combine", "a.wav"]).is_err());
    }

    #[test]
    fn into_without_combine_rejected() {
        let cli = parse(&["sine", "440", "out", "--into", "mix"]).unwrap();
        let err = cli.command().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigurationError);
        assert!(err.message.contains("--into"));
    }
}
