use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::process;
use tracing_subscriber::EnvFilter;

use idprobe::output;
use idprobe::parser::{self, registry};

#[derive(Parser)]
#[command(name = "idprobe")]
#[command(about = "Inspect, decode and generate unique identifiers", long_about = None)]
#[command(version)]
struct Cli {
    /// The identifier to inspect, or "-" to read one line from stdin
    id: Option<String>,

    /// Force parsing as a specific format instead of auto-detection
    #[arg(short = 'f', long = "format")]
    format: Option<String>,

    /// Output format (card, short, json, binary)
    #[arg(short = 'o', long = "output", default_value = "card")]
    output: String,

    /// Show every format interpretation that accepts the input
    #[arg(short = 'e', long = "everything")]
    everything: bool,

    /// Compare embedded timestamps across all matching formats
    #[arg(long)]
    compare: bool,

    /// Generate a new ID of the given format (uuid also takes uuid:v1..uuid:v7)
    #[arg(short = 'g', long = "generate")]
    generate: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if let Some(format) = &cli.generate {
        generate_id(format);
        return Ok(());
    }

    let input = read_input(cli.id.as_deref())?;
    if input.is_empty() {
        eprintln!("Error: Empty input provided");
        eprintln!("Please provide a valid ID to parse.");
        process::exit(1);
    }

    let results = match registry().parse(&input, cli.format.as_deref()) {
        Ok(results) => results,
        Err(err) => {
            tracing::debug!("parse failed: {err}");
            eprintln!("Error: Unable to parse ID '{input}'");
            if let Some(format) = &cli.format {
                eprintln!("The ID cannot be parsed as format '{format}'.");
                eprintln!("Try without the -f flag for auto-detection.");
            } else {
                eprintln!("The ID format is not recognized or supported.");
                eprintln!(
                    "Supported formats: {}",
                    registry().all_names().join(", ")
                );
                eprintln!("Try using -f to force a specific format.");
            }
            process::exit(1);
        }
    };

    let color = !cli.no_color && atty::is(atty::Stream::Stdout);

    if cli.everything {
        print!("{}", output::render_everything(&results, color));
        return Ok(());
    }
    if cli.compare {
        print!("{}", output::render_compare(&results));
        return Ok(());
    }

    // Best match is the first result
    let result = &results[0];
    match cli.output.as_str() {
        "card" => print!("{}", output::render_card(result, color)),
        "short" => print!("{}", output::render_short(result)),
        "json" => match serde_json::to_string_pretty(result) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Error generating JSON output: {err}");
                process::exit(1);
            }
        },
        "binary" => io::stdout().write_all(&result.binary_bytes)?,
        other => {
            eprintln!("Error: Unknown output format '{other}'");
            eprintln!("Supported formats: card, short, json, binary");
            process::exit(1);
        }
    }

    Ok(())
}

fn read_input(arg: Option<&str>) -> Result<String> {
    match arg {
        Some("-") => {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok(line.trim().to_string())
        }
        Some(id) => Ok(id.trim().to_string()),
        None => {
            eprintln!("Error: Please provide an ID to parse");
            eprintln!("Usage: idprobe [OPTIONS] <ID>");
            eprintln!("Try 'idprobe --help' for more information.");
            process::exit(1);
        }
    }
}

fn generate_id(format: &str) {
    // "uuid:vN" selects a specific UUID version
    if let Some(version) = format
        .to_lowercase()
        .strip_prefix("uuid:")
        .map(str::to_string)
    {
        match parser::uuid::generate_with_version(&version) {
            Ok(id) => println!("{id}"),
            Err(err) => {
                eprintln!("Error generating UUID {version}: {err}");
                process::exit(1);
            }
        }
        return;
    }

    match registry().generate(format) {
        Ok(id) => println!("{id}"),
        Err(idprobe::error::IdError::UnknownFormatName(_)) => {
            eprintln!("Error: Unsupported format '{format}'");
            eprintln!("Supported formats: {}", registry().all_names().join(", "));
            eprintln!(
                "For UUID, you can also specify version: uuid:v1, uuid:v3, uuid:v4, uuid:v5, uuid:v6, uuid:v7"
            );
            process::exit(1);
        }
        Err(err) => {
            eprintln!("Error generating {format}: {err}");
            process::exit(1);
        }
    }
}
