// lambdatron - A Clojure-ish interpreter written in Rust

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use lambdatron_core::{Interpreter, Outcome};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() == 2 && (args[1] == "--version" || args[1] == "-v") {
        println!("Lambdatron v0.1.0");
        return;
    }

    let interp = match Interpreter::new() {
        Ok(interp) => interp,
        Err(e) => {
            eprintln!("Failed to load stdlib: {}", e);
            process::exit(1);
        }
    };

    // If files are provided, evaluate them; otherwise start a REPL.
    if args.len() > 1 {
        run_files(&args[1..], &interp);
    } else {
        run_repl(&interp);
    }
}

/// Evaluate a sequence of source files.
fn run_files(files: &[String], interp: &Interpreter) {
    for file_path in files {
        if let Err(e) = eval_file(file_path, interp) {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

/// Evaluate a single source file.
fn eval_file(file_path: &str, interp: &Interpreter) -> Result<(), String> {
    let path = Path::new(file_path);

    match path.extension().and_then(|e| e.to_str()) {
        Some("lbt") => {}
        Some(ext) => {
            return Err(format!(
                "Error: unsupported file extension '.{}' for '{}'",
                ext, file_path
            ));
        }
        None => {
            return Err(format!(
                "Error: file '{}' has no extension (expected .lbt)",
                file_path
            ));
        }
    }

    let source =
        fs::read_to_string(path).map_err(|e| format!("Error reading '{}': {}", file_path, e))?;

    match interp.evaluate(&source) {
        Outcome::Success(_) => Ok(()),
        Outcome::ReadFailure(e) => Err(format!("{}: {}", file_path, e)),
        Outcome::EvalFailure(e) => Err(format!("{}: {}", file_path, e)),
    }
}

/// Interactive read-eval-print loop.
fn run_repl(interp: &Interpreter) {
    println!("Lambdatron v0.1.0");
    println!("Type expressions to evaluate, or Ctrl-D to exit.");

    let stdin = io::stdin();
    loop {
        print!("{}=> ", interp.current_namespace().name());
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == ":quit" || trimmed == ":exit" {
            break;
        }

        match interp.evaluate(trimmed) {
            Outcome::Success(value) => match interp.realize(&value) {
                Ok(()) => println!("{}", value),
                Err(e) => println!("Error: {}", e),
            },
            Outcome::ReadFailure(e) => println!("{}", e),
            Outcome::EvalFailure(e) => println!("Error: {}", e),
        }
    }
    println!("\nGoodbye!");
}
