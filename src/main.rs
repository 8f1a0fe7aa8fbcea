pub mod category;
pub mod decoder;
pub mod stats;
pub mod token;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::stats::Summary;
use crate::token::tokenizer::{Error, Tokens};

#[derive(Debug, Parser)]
#[command(name = "rstok", about = "Streaming tokenizer for mixed Latin/Cyrillic text")]
struct Args {
    /// Input file; reads stdin when absent or `-`.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print a frequency summary instead of the token stream.
    #[arg(long)]
    stats: bool,

    /// Consume the input without printing tokens.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    match &args.input {
        Some(path) if path.as_os_str() != "-" => {
            let input = BufReader::new(File::open(path)?);
            print_tokens(input, args)
        }
        _ => {
            let stdin = io::stdin();
            print_tokens(stdin.lock(), args)
        }
    }
}

fn print_tokens(input: impl BufRead, args: &Args) -> Result<(), Error> {
    let mut summary = Summary::new();
    for token in Tokens::new(input) {
        let token = token?;
        if args.stats {
            summary.record(&token);
        } else if !args.quiet {
            println!("{token:?}");
        }
    }
    if args.stats {
        print!("{summary}");
    }
    Ok(())
}
