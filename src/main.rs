//! chordtree: parse chord symbols and chord progressions from the command line.
//!
//! With arguments, the words are joined with spaces and parsed as one input.
//! Without, stdin is read line by line and blank lines are skipped.

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use miette::Report;
use tracing::{debug, info, Level};

use chordtree::config::{Config, ConfigError, OutputFormat};
use chordtree::diagnostic::ParseDiagnostic;
use chordtree::output::{render_lenient, render_tokens, render_tree};
use chordtree::syntax::recovery::parse_lenient;
use chordtree::syntax::{ChordParser, Grammar, ParseError};

#[derive(Debug, Parser)]
#[command(name = "chordtree", version, about = "Parse chord symbols and chord progressions")]
struct Cli {
    /// Chord or progression, e.g. `Am7/G` or `C - Am - F - G`
    input: Vec<String>,

    /// Output format (overrides the config file)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Accept a single chord or a progression (overrides the config file)
    #[arg(long, value_enum)]
    grammar: Option<Grammar>,

    /// Parse each `-`-separated chord on its own and report every bad one
    #[arg(long)]
    lenient: bool,

    /// Maximum input length in bytes
    #[arg(long)]
    max_len: Option<usize>,

    /// Config file (default: ~/.chordtree/config.yaml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct Session {
    parser: ChordParser,
    format: OutputFormat,
    lenient: bool,
}

impl Session {
    fn new(cli: &Cli, config: &Config) -> Self {
        let mut options = config.parse_options();
        if let Some(grammar) = cli.grammar {
            options.grammar = grammar;
        }
        if cli.max_len.is_some() {
            options.max_len = cli.max_len;
        }
        Self {
            parser: ChordParser::with_options(options),
            format: cli.format.unwrap_or(config.format),
            lenient: cli.lenient || config.lenient,
        }
    }

    /// Parse and print one input. Returns false if anything failed.
    fn process(&self, input: &str) -> bool {
        debug!(input, "parsing");

        if self.lenient {
            return self.process_lenient(input);
        }

        if self.format == OutputFormat::Tokens {
            return match self.parser.tokenize(input) {
                Ok(tokens) => {
                    println!("{}", render_tokens(input, &tokens));
                    true
                }
                Err(err) => report(input, &err),
            };
        }

        match self.parser.parse(input) {
            Ok(tree) => match render_tree(&tree, self.format) {
                Ok(text) => {
                    println!("{text}");
                    true
                }
                Err(err) => {
                    eprintln!("failed to render output: {err}");
                    false
                }
            },
            Err(err) => report(input, &err),
        }
    }

    fn process_lenient(&self, input: &str) -> bool {
        let result = parse_lenient(input);
        debug!(segments = result.segments.len(), "lenient parse");
        let lines = match render_lenient(&result, self.format) {
            Ok(lines) => lines,
            Err(err) => {
                eprintln!("failed to render output: {err}");
                return false;
            }
        };
        let mut ok = true;
        for line in lines {
            match line {
                Ok(text) => println!("{text}"),
                Err(err) => ok = report(input, &err) && ok,
            }
        }
        ok
    }
}

/// Print a rendered diagnostic to stderr. Always returns false.
fn report(input: &str, err: &ParseError) -> bool {
    debug!(offset = err.offset(), "parse failed");
    eprintln!("{:?}", Report::new(ParseDiagnostic::new("input", input, err)));
    false
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    match &cli.config {
        Some(path) => {
            let config = Config::load_from(path)?;
            info!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(Config::load().unwrap_or_default()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:?}", Report::new(err));
            return ExitCode::FAILURE;
        }
    };
    let session = Session::new(&cli, &config);

    let ok = if !cli.input.is_empty() {
        session.process(&cli.input.join(" "))
    } else {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            eprintln!(
                "chordtree v{}: enter a chord or progression (e.g. 'C' or 'C - F - G - C')",
                env!("CARGO_PKG_VERSION")
            );
            eprintln!("Press Ctrl+D (Unix) or Ctrl+Z (Windows) to exit\n");
        }

        let mut ok = true;
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    eprintln!("failed to read stdin: {err}");
                    ok = false;
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            ok = session.process(&line) && ok;
        }
        ok
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
