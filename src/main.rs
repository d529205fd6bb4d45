//! Silver Board - console front end
//!
//! Reads one command per line from stdin and drives an in-memory order
//! board. Every update is echoed by a printing listener.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::Parser;
use silver_board::command::{execute, render_summary, Command, CANCEL_USAGE, REGISTER_USAGE};
use silver_board::{OrderBoard, OrderBookSummary, DEFAULT_CAPACITY};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "silver-board")]
#[command(about = "Interactive limit order board")]
struct Args {
    /// Maximum number of orders the board can ever register
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Log level, overridden by RUST_LOG
    #[arg(short, long, default_value = "warn", value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: String,

    /// Print summaries as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn print_usage() {
    println!("COMMANDS:");
    println!("  {REGISTER_USAGE}");
    println!("  {CANCEL_USAGE}");
    println!("  SUMMARY");
    println!("  EXIT");
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let board = OrderBoard::with_capacity(args.capacity)?;
    let json = args.json;
    board.add_update_listener(Arc::new(move |summary: &OrderBookSummary| {
        println!("UPDATE:\n{}", render_summary(summary, json));
    }));

    print_usage();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                if !execute(&board, command, &mut stdout, json)? {
                    break;
                }
            }
            Err(e) => {
                println!("{e}");
                print_usage();
            }
        }
        stdout.flush()?;
    }

    Ok(())
}
