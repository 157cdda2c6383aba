//! Command-line rotor machine.
//!
//! Reads a machine description, then pipes an input script of setting and
//! message lines through it:
//!
//! ```bash
//! enigma navy.conf messages.in            # output to stdout
//! enigma navy.conf messages.in out.txt
//! enigma --verbose navy.conf < script     # trace keystrokes to stderr
//! ```

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use enigma::{MachineConfig, Session, StepTrace};

/// Rotor cipher machine simulator.
#[derive(Parser)]
#[command(name = "enigma")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Trace every keystroke's stages to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Machine configuration file.
    config: PathBuf,

    /// Input script; stdin when omitted.
    input: Option<PathBuf>,

    /// Output file; stdout when omitted.
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.config)
        .with_context(|| format!("reading configuration {}", cli.config.display()))?;
    let mut machine = MachineConfig::parse(&text)?.build()?;
    if cli.verbose {
        machine.set_tracer(Some(Box::new(render_trace)));
    }
    let mut session = Session::new(machine);

    let script = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading input {}", path.display()))?,
        None => io::read_to_string(io::stdin())?,
    };
    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating output {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    for line in script.lines() {
        if let Some(output) = session.process_line(line)? {
            writeln!(out, "{output}")?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Renders one keystroke as `[positions] in -> plug -> fwd -> back -> out`.
fn render_trace(trace: &StepTrace) {
    let forward: String = trace.forward.iter().collect();
    let backward: String = trace.backward.iter().collect();
    eprintln!(
        "[{}] {} -> {} -> {} -> {} -> {}",
        trace.positions, trace.input, trace.plugboard_in, forward, backward, trace.output
    );
}
