//! Command-line parsing for cfec.

use anyhow::{anyhow, bail, Result};
use cfe_lexer::{CxxStandard, Features, Options, Standard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Lex,
    Parse,
}

#[derive(Debug)]
pub struct Invocation {
    pub command: Command,
    pub options: Options,
    pub inputs: Vec<String>,
}

pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut args = args.iter();
    let command = match args.next().map(String::as_str) {
        Some("lex") => Command::Lex,
        Some("parse") => Command::Parse,
        Some(other) => bail!("unknown command \"{other}\""),
        None => bail!("missing command"),
    };

    let mut c_std = None;
    let mut cxx_std = None;
    let mut extra = Features::empty();
    let mut inputs = Vec::new();

    let mut args = args.peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-x" => {
                let lang = args
                    .next()
                    .ok_or_else(|| anyhow!("-x requires a language name"))?;
                apply_standard(Options::parse_language(lang)?, &mut c_std, &mut cxx_std);
            }
            "-fdigraphs" => extra |= Features::DIGRAPHS,
            "-ftrigraphs" => extra |= Features::TRIGRAPHS,
            "-fbinary-literals" => extra |= Features::BINARY_LITERALS,
            "-fdollars-in-identifiers" => extra |= Features::IDENTIFIER_DOLLARS,
            "-finline-functions" => extra |= Features::INLINE_FUNCTIONS,
            "-fline-comments" => extra |= Features::LINE_COMMENTS,
            "-flong-long" => extra |= Features::LONG_LONG,
            "-fucns" => extra |= Features::UCNS,
            "-fkeep-space" => extra |= Features::KEEP_SPACE,
            "-fkeep-comments" => extra |= Features::KEEP_COMMENTS,
            "-" => inputs.push(arg.clone()),
            _ => {
                if let Some(name) = arg.strip_prefix("-std=") {
                    apply_standard(Options::parse_standard(name)?, &mut c_std, &mut cxx_std);
                } else if let Some(locale) = arg.strip_prefix("-finput-locale=") {
                    // only UTF-8 input is supported
                    if !locale.eq_ignore_ascii_case("utf-8") && !locale.eq_ignore_ascii_case("utf8")
                    {
                        bail!("unsupported input locale \"{locale}\" (UTF-8 only)");
                    }
                } else if arg.starts_with('-') {
                    bail!("unknown option \"{arg}\"");
                } else {
                    inputs.push(arg.clone());
                }
            }
        }
    }

    if inputs.is_empty() {
        bail!("no input files");
    }

    // default dialect: latest C++
    if c_std.is_none() && cxx_std.is_none() {
        cxx_std = Some(CxxStandard::LATEST);
    }

    let options = Options::new(c_std, cxx_std, extra)?;
    Ok(Invocation {
        command,
        options,
        inputs,
    })
}

fn apply_standard(
    standard: Standard,
    c_std: &mut Option<cfe_lexer::CStandard>,
    cxx_std: &mut Option<CxxStandard>,
) {
    match standard {
        Standard::C(std) => *c_std = Some(std),
        Standard::Cxx(std) => *cxx_std = Some(std),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parses_command_and_files() {
        let inv = parse_args(&args(&["lex", "a.c", "b.c"])).unwrap();
        assert_eq!(inv.command, Command::Lex);
        assert_eq!(inv.inputs, vec!["a.c", "b.c"]);
        // default dialect is the latest C++
        assert!(inv.options.std_cxx17());
    }

    #[test]
    fn std_flag_selects_dialect() {
        let inv = parse_args(&args(&["parse", "-std=c99", "x.c"])).unwrap();
        assert!(inv.options.lang_c());
        assert!(inv.options.std_c99());
        assert!(!inv.options.lang_cxx());
    }

    #[test]
    fn x_flag_selects_latest() {
        let inv = parse_args(&args(&["lex", "-x", "c", "x.c"])).unwrap();
        assert!(inv.options.std_c11());
    }

    #[test]
    fn both_languages_may_be_selected() {
        let inv = parse_args(&args(&["lex", "-std=c99", "-std=c++11", "x.cc"])).unwrap();
        assert!(inv.options.lang_c());
        assert!(inv.options.lang_cxx());
    }

    #[test]
    fn feature_flags() {
        let inv = parse_args(&args(&["lex", "-std=c89", "-fdigraphs", "-fucns", "x.c"])).unwrap();
        assert!(inv.options.have(Features::DIGRAPHS | Features::UCNS));
    }

    #[test]
    fn rejects_unknown_standard_and_option() {
        assert!(parse_args(&args(&["lex", "-std=c++20", "x.cc"])).is_err());
        assert!(parse_args(&args(&["lex", "--bogus", "x.cc"])).is_err());
        assert!(parse_args(&args(&["frobnicate", "x.cc"])).is_err());
    }

    #[test]
    fn stdin_marker_is_an_input() {
        let inv = parse_args(&args(&["lex", "-"])).unwrap();
        assert_eq!(inv.inputs, vec!["-"]);
    }

    #[test]
    fn requires_inputs() {
        assert!(parse_args(&args(&["lex", "-std=c99"])).is_err());
    }
}
