//! Map store console
//!
//! Replays a script of sidebar and renderer events against a map store and
//! prints the derived overlay layers as JSON lines.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use map_console::{ConsoleError, Session};
use map_store::{default_config_toml, StoreConfig};

/// Command line arguments for the console
#[derive(Parser, Debug)]
#[command(name = "map_console")]
#[command(about = "Replay map store events and print derived layers")]
struct Args {
    /// TOML configuration for the initial session state
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSONL script of commands (reads stdin when omitted)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Where to write frames (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Random seed for wind particle sampling
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop at the first command the store rejects
    #[arg(long)]
    strict: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<(), ConsoleError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {:?}", path);
            StoreConfig::from_file(path)?
        }
        None => StoreConfig::default(),
    };

    let mut session = Session::new(config, args.seed)?.strict(args.strict);
    tracing::info!(seed = args.seed, strict = args.strict, "Session started");

    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let summary = match &args.script {
        Some(path) => session.run_script(BufReader::new(File::open(path)?), output)?,
        None => session.run_script(io::stdin().lock(), output)?,
    };

    tracing::info!(
        commands = summary.commands,
        rejected = summary.rejected,
        frames = summary.frames,
        "Script finished"
    );
    Ok(())
}
