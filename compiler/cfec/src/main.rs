//! cfec: lex or parse C/C++ sources from the command line.
//!
//! Usage:
//!
//! ```text
//! cfec lex   [options] <file>...     dump the token stream
//! cfec parse [options] <file>...     parse declarations
//! ```
//!
//! Options: `-std=<name>`, `-x <lang>`, `-fdigraphs`, `-ftrigraphs`,
//! `-fbinary-literals`, `-fdollars-in-identifiers`, `-finline-functions`,
//! `-fline-comments`, `-flong-long`, `-fucns`, plus `-fkeep-space` /
//! `-fkeep-comments` for the token dump. `-` reads stdin. The exit code is
//! nonzero when any file produced an error.

mod options;

use anyhow::{Context, Result};
use cfe_diagnostic::DiagnosticSink;
use cfe_ir::TokenKind;
use cfe_lexer::Lexer;
use cfe_lexer_core::CharSource;
use cfe_parse::Parser;
use options::{Command, Invocation};
use std::fs::File;
use std::io::Read;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match options::parse_args(&args) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("cfec: {err}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    let mut failed = false;
    for input in &invocation.inputs {
        if let Err(err) = run_one(&invocation, input) {
            eprintln!("cfec: {input}: {err:#}");
            failed = true;
        }
    }
    if failed {
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: cfec <lex|parse> [options] <file>...");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -std=<name>               language standard (c89..c11, c++98..c++17)");
    eprintln!("  -x <lang>                 language (c or c++), latest standard");
    eprintln!("  -fdigraphs -ftrigraphs -fbinary-literals -fdollars-in-identifiers");
    eprintln!("  -finline-functions -fline-comments -flong-long -fucns");
    eprintln!("  -fkeep-space -fkeep-comments");
    eprintln!("  -                         read standard input");
}

fn open_input(path: &str) -> Result<CharSource> {
    if path == "-" {
        Ok(CharSource::new(Box::new(std::io::stdin())))
    } else {
        let file = File::open(path).with_context(|| "cannot open")?;
        Ok(CharSource::new(Box::new(file) as Box<dyn Read>))
    }
}

fn run_one(invocation: &Invocation, path: &str) -> Result<()> {
    let source = open_input(path)?;
    let sink = DiagnosticSink::new();
    let mut lexer = Lexer::new(&invocation.options, source, &sink);

    match invocation.command {
        Command::Lex => {
            loop {
                let token = lexer.lex();
                if token.kind == TokenKind::Eof {
                    break;
                }
                println!(
                    "{}:{}: {} \"{}\" [{:#04x}]",
                    token.line,
                    token.column,
                    token.kind.name(),
                    token.spelling(lexer.interner()).escape_default(),
                    token.flags.bits(),
                );
            }
        }
        Command::Parse => {
            let mut parser = Parser::new(&mut lexer, &sink);
            let mut parsed = 0usize;
            while !parser.at_eof() {
                if parser.parse_declaration().is_some() {
                    parsed += 1;
                } else if !parser.skip_token() {
                    break;
                }
            }
            println!("{path}: {parsed} declaration(s), {} error(s)", sink.error_count());
        }
    }

    sink.for_each(|d| eprintln!("{path}:{d}"));
    if sink.error_count() > 0 {
        anyhow::bail!("{} error(s)", sink.error_count());
    }
    Ok(())
}
