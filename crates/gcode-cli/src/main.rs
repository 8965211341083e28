//! Illustrative driver: reads a G-code file in 4 KiB chunks, feeds it
//! through [`gcode_parser::Parser`], and reports errors to stdout.
//! There is no interpreter here — that, like the node library itself,
//! is an external collaborator this crate only demonstrates feeding.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use gcode_ast::Node;
use gcode_parser::{Parser, StatementSink};

const CHUNK_SIZE: usize = 4096;

#[derive(ClapParser, Debug)]
#[command(author, version, about = "Parses a G-code file and reports any lexical or syntactic errors.")]
struct Cli {
    /// Path to the G-code file to parse.
    filename: PathBuf,
}

/// Counts completed statements and logs them at debug level; there is
/// nothing downstream in this workspace to hand the AST to, so that's
/// all it does with a successfully parsed statement.
struct ReportingSink {
    statement_count: usize,
}

impl StatementSink for ReportingSink {
    fn error(&mut self, message: &str) -> bool {
        println!("*** ERROR: {message}");
        true
    }

    fn statement(&mut self, node: Node) -> bool {
        self.statement_count += 1;
        tracing::debug!(?node, "parsed statement");
        true
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(1);
        }
    };

    let mut file = match File::open(&cli.filename) {
        Ok(file) => file,
        Err(err) => {
            println!("*** ERROR: {}: {err}", cli.filename.display());
            return ExitCode::from(1);
        }
    };

    let mut parser = Parser::new(ReportingSink { statement_count: 0 });
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) => {
                println!("*** ERROR: {err}");
                return ExitCode::from(1);
            }
        };
        parser.parse(&buf[..n]);
    }
    parser.finish();

    let sink = parser.into_sink();
    tracing::info!(statements = sink.statement_count, "parse complete");
    ExitCode::SUCCESS
}
