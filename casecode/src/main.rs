//! Command-line interface for casecode encoding/decoding.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};

/// casecode - Encode mixed-case identifiers for lowercase address components
#[derive(Parser, Debug)]
#[command(name = "casecode")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode strings (reads stdin lines when none are given)
    Encode {
        /// Percent-escape the marker for use in a URL
        #[arg(long)]
        escape: bool,

        strings: Vec<String>,
    },
    /// Decode strings, undoing percent-escaped markers first
    Decode { strings: Vec<String> },
}

fn run(strings: Vec<String>, f: impl Fn(&str) -> String) -> io::Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    if !strings.is_empty() {
        for s in &strings {
            writeln!(stdout, "{}", f(s))?;
        }
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        writeln!(stdout, "{}", f(&line?))?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::Encode { escape, strings } => {
            if let Some(bad) = strings.iter().find(|s| !casecode::is_encodable(s)) {
                eprintln!(
                    "Error: '{}' contains '{}' and cannot be encoded reversibly",
                    bad,
                    casecode::MARKER
                );
                std::process::exit(1);
            }
            if escape {
                run(strings, casecode::encode_component)
            } else {
                run(strings, casecode::encode)
            }
        }
        Command::Decode { strings } => run(strings, casecode::decode_component),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
