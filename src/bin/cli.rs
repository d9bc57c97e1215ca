use std::io::{self, BufRead};
use std::str::FromStr;

use ninebase::board::Board;
use ninebase::logger::init_logging;
use ninebase::{Context, add_path, init, probe};

fn main() {
    init_logging("logs/ninebase.log", "ninebase=info");

    let mut fens: Vec<String> = Vec::new();
    let mut args = std::env::args().skip(1);
    let mut paths = 0usize;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--path" | "-p" => {
                let Some(root) = args.next() else {
                    eprintln!("--path needs a directory argument");
                    std::process::exit(2);
                };
                add_path(root);
                paths += 1;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => fens.push(other.to_string()),
        }
    }

    if paths == 0 {
        eprintln!("warning: no table roots registered, every probe will be unknown");
    }

    init();
    let mut ctx = Context::new();

    if fens.is_empty() {
        // No operands: read FEN lines from stdin.
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            score_one(&mut ctx, line);
        }
    } else {
        for fen in &fens {
            score_one(&mut ctx, fen);
        }
    }
}

fn score_one(ctx: &mut Context, fen: &str) {
    match Board::from_str(fen) {
        Ok(board) => println!("{fen} -> {}", probe(ctx, &board)),
        Err(e) => eprintln!("{fen} -> bad position: {e}"),
    }
}

fn print_usage() {
    println!("usage: ninebase [--path DIR]... [FEN]...");
    println!();
    println!("Scores endgame positions against the registered table roots.");
    println!("With no FEN operands, positions are read one per line from stdin.");
}
