/*!
pagestate CLI - command-line interface for the page state envelope codec.

Converts state pair files to and from their stored envelope form and
inspects stored envelopes. The file formats here belong to the CLI, not the
core: a state file is a `StatePair` as JSON, a stored file is the two
outward slots as a JSON array.
*/

use clap::{Parser, Subcommand};
use pagestate_core::{
    create_codec_from_config, CodecConfig, CompressionAdapter, GzipCompressor,
    JsonStateSerializer, Slot, StatePair, StateSerializer,
};
use std::path::PathBuf;
use tabled::{Table, Tabled};
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "pagestate")]
#[command(about = "CLI for the page state envelope codec")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a state pair file into its stored envelope form
    Encode {
        /// Path to the state pair JSON file
        input: PathBuf,
        /// Path to write the stored envelope file
        output: PathBuf,
        /// Gzip compression level (0-9)
        #[arg(short, long, default_value_t = 6, env = "PAGESTATE_COMPRESSION_LEVEL")]
        level: u32,
    },
    /// Decode a stored envelope file back into a state pair file
    Decode {
        /// Path to the stored envelope file
        input: PathBuf,
        /// Path to write the state pair JSON file
        output: PathBuf,
    },
    /// Show details of a stored envelope file
    Inspect {
        /// Path to the stored envelope file
        input: PathBuf,
    },
}

#[derive(Tabled)]
struct EnvelopeInfo {
    #[tabled(rename = "Variant")]
    variant: String,
    #[tabled(rename = "Primary")]
    primary: String,
    #[tabled(rename = "Secondary")]
    secondary: String,
    #[tabled(rename = "Stored Size")]
    stored_size: String,
    #[tabled(rename = "Decompressed Size")]
    decompressed_size: String,
    #[tabled(rename = "Ratio")]
    ratio: String,
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode {
            input,
            output,
            level,
        } => encode(&input, &output, level)?,
        Commands::Decode { input, output } => decode(&input, &output)?,
        Commands::Inspect { input } => inspect(&input)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"))
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn encode(input: &PathBuf, output: &PathBuf, level: u32) -> Result<(), anyhow::Error> {
    let config = CodecConfig {
        compression_level: level,
    };
    let codec = create_codec_from_config(&config)?;

    let state_json = std::fs::read(input)?;
    let pair: StatePair = serde_json::from_slice(&state_json)?;

    let (primary, secondary) = codec.encode(pair)?;
    debug!(?output, "writing stored envelope");
    write_slots(output, &primary, &secondary)?;

    match primary {
        Slot::CompressedPayload(payload) => {
            println!(
                "stored compressed: {} -> {}",
                format_size(state_json.len() as u64),
                format_size(payload.len() as u64)
            );
        }
        _ => println!("stored raw: {}", format_size(state_json.len() as u64)),
    }

    Ok(())
}

fn decode(input: &PathBuf, output: &PathBuf) -> Result<(), anyhow::Error> {
    let codec = create_codec_from_config(&CodecConfig::default())?;
    let (primary, secondary) = read_slots(input)?;

    match codec.decode(primary, secondary) {
        Ok(pair) => {
            std::fs::write(output, serde_json::to_vec_pretty(&pair)?)?;
            println!("decoded state pair written to {}", output.display());
            Ok(())
        }
        Err(e) => {
            error!("failed to decode stored envelope: {}", e);
            Err(e.into())
        }
    }
}

fn inspect(input: &PathBuf) -> Result<(), anyhow::Error> {
    let (primary, secondary) = read_slots(input)?;

    let stored_size = primary.stored_len() + secondary.stored_len();

    let info = match &primary {
        Slot::CompressedPayload(payload) => {
            let decompressed = GzipCompressor::new().decompress(payload)?;
            let pair = JsonStateSerializer::new().deserialize(&decompressed)?;

            EnvelopeInfo {
                variant: "Compressed".to_string(),
                primary: "compressed payload".to_string(),
                secondary: describe_slot(&secondary),
                stored_size: format_size(stored_size as u64),
                decompressed_size: format_size(decompressed.len() as u64),
                ratio: format!(
                    "{:.0}% (secondary {})",
                    100.0 * payload.len() as f64 / decompressed.len() as f64,
                    if pair.secondary.is_some() {
                        "present"
                    } else {
                        "absent"
                    }
                ),
            }
        }
        _ => EnvelopeInfo {
            variant: "Raw".to_string(),
            primary: describe_slot(&primary),
            secondary: describe_slot(&secondary),
            stored_size: format_size(stored_size as u64),
            decompressed_size: "-".to_string(),
            ratio: "-".to_string(),
        },
    };

    let table = Table::new(vec![info]);
    println!("{table}");

    Ok(())
}

fn describe_slot(slot: &Slot) -> String {
    match slot {
        Slot::Value(_) => "value".to_string(),
        Slot::CompressedPayload(_) => "compressed payload".to_string(),
        Slot::Empty => "empty".to_string(),
    }
}

fn write_slots(path: &PathBuf, primary: &Slot, secondary: &Slot) -> Result<(), anyhow::Error> {
    let bytes = serde_json::to_vec(&(primary, secondary))?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn read_slots(path: &PathBuf) -> Result<(Slot, Slot), anyhow::Error> {
    let bytes = std::fs::read(path)?;
    let slots: (Slot, Slot) = serde_json::from_slice(&bytes)?;
    Ok(slots)
}

fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_then_decode_files() {
        let dir = tempfile::tempdir().unwrap();
        let state_path = dir.path().join("state.json");
        let stored_path = dir.path().join("stored.json");
        let out_path = dir.path().join("restored.json");

        let pair = StatePair::new(json!({"rows": vec!["repeated row"; 50]}), None);
        std::fs::write(&state_path, serde_json::to_vec(&pair).unwrap()).unwrap();

        encode(&state_path, &stored_path, 6).unwrap();
        decode(&stored_path, &out_path).unwrap();

        let restored: StatePair =
            serde_json::from_slice(&std::fs::read(&out_path).unwrap()).unwrap();
        assert_eq!(restored, pair);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
    }
}
