use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use log::LevelFilter;
use minipas::lexer::{Scanner, TokenKind};
use minipas::parser::{parse_with, ParserOptions, DEFAULT_MAX_DEPTH};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(ClapParser)]
#[command(name = "minipas")]
#[command(about = "Scanner and syntax checker for a small Pascal-like language", long_about = None)]
struct Cli {
    /// Increase log output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize the input file and list its tokens
    Lex {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Check the input file against the grammar
    Parse {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Deepest statement/expression nesting accepted
        #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Print the parsed program
        #[arg(long)]
        dump_ast: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let clean = match cli.command {
        Commands::Lex { file } => lex_file(&file)?,
        Commands::Parse {
            file,
            max_depth,
            dump_ast,
        } => parse_file(&file, ParserOptions { max_depth }, dump_ast)?,
    };

    Ok(if clean { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file '{}'", path.display()))
}

/// Returns whether the file scanned without error tokens
fn lex_file(path: &Path) -> Result<bool> {
    let input = read_source(path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut scanner = Scanner::new(input);
    let mut count = 0;
    let mut errors = 0;
    loop {
        let token = scanner.next_token();
        if token.kind == TokenKind::Eof {
            break;
        }
        count += 1;
        if token.kind.is_error() {
            errors += 1;
        }
        writeln!(out, "{token}")?;
    }

    writeln!(out)?;
    writeln!(out, "Lines: {}", scanner.line())?;
    writeln!(out, "Total tokens: {count}")?;
    Ok(errors == 0)
}

/// Returns whether the program parsed without diagnostics
fn parse_file(path: &Path, options: ParserOptions, dump_ast: bool) -> Result<bool> {
    let input = read_source(path)?;
    let outcome = parse_with(&input, options);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    outcome
        .diagnostics
        .emit(&mut out)
        .with_context(|| format!("failed to report diagnostics for '{}'", path.display()))?;

    if outcome.is_success() {
        if dump_ast {
            if let Some(program) = &outcome.program {
                writeln!(out, "{program:#?}")?;
            }
            writeln!(out, "Variables:")?;
            for symbol in outcome.symbols.iter() {
                let var_type = symbol.var_type.map_or_else(|| "?".to_string(), |t| t.to_string());
                writeln!(out, "  {}: {}", symbol.name, var_type)?;
            }
        }
        writeln!(out)?;
        writeln!(out, "(DONE)")?;
        Ok(true)
    } else {
        writeln!(out)?;
        writeln!(out, "Unsuccessful Parsing")?;
        writeln!(out, "Number of Syntax Errors {}", outcome.error_count())?;
        Ok(false)
    }
}
