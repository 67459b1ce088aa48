//! CLI tool to rewrite Swift sources into Kotlin syntax.

use std::fs;
use std::process::ExitCode;

use swiftkotlin::{Config, transpile_report};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: swiftkotlin <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  transpile  Rewrite Swift file(s) and print Kotlin to stdout");
        eprintln!("  report     Print the rewrites each stage applied");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  swiftkotlin transpile Model.swift");
        eprintln!("  swiftkotlin report Sources/*.swift");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if !matches!(command, "transpile" | "report") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let config = Config::default();
    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        let (output, report) = match transpile_report(&content, &config) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        if command == "transpile" {
            print!("{output}");
        } else {
            eprintln!("{path}: {} rewrite(s)", report.total_rewrites());
            for stage in &report.stages {
                eprintln!("  {:<26} {}", stage.stage.name(), stage.rewrites);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
