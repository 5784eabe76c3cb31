//! # dicelang
//!
//! This binary is the dicelang interpreter driver. It reads a script file, feeds it
//! through the lexer, parser and interpreter, and reports the outcome on the error
//! stream.

mod cli;

use cli::*;

use std::{fs, io::Write, process};

use dicelang::{error::DicelangError, interpreter::Interpreter, lexer::Lexer, parser};
use log::{error, info};

fn main() {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(read_error) => {
            error!(
                "failed to open file \"{}\": {}",
                args.file.to_string_lossy(),
                read_error
            );
            process::exit(-2);
        }
    };

    match execute(&source, &args) {
        Ok(()) => {
            eprintln!("dicelang: no error");
        }
        Err(script_error) => {
            eprintln!("{script_error}");
            process::exit(1);
        }
    }
}

/// Runs the pipeline on a script, dumping the intermediate stages when asked to.
fn execute(source: &str, args: &Cli) -> Result<(), DicelangError> {
    let tokens = Lexer::new(source).lex()?;

    if args.dump_tokens {
        info!("Tokens:\n{:#?}", tokens);
    }

    let tree = parser::parse(tokens)?;

    if args.dump_parsed {
        info!("Parse tree:\n{:#?}", tree);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    Interpreter::new(&mut out).interpret(&tree)?;
    out.flush().ok();

    Ok(())
}
