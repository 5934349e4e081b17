//! CLI tool that translates C-like source files to Python.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use c2py::Options;

/// Translate a small C-like language to Python
#[derive(Parser, Debug)]
#[command(name = "c2py", version, about, long_about = None)]
struct Args {
    /// Source file; reads stdin when absent or `-`
    input: Option<PathBuf>,

    /// Write the translation here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Skip unsupported constructs with a warning instead of failing
    #[arg(long)]
    lenient: bool,

    /// Extra identifier that starts a function definition (repeatable)
    #[arg(long = "return-type", value_name = "NAME")]
    return_types: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn options(&self) -> Options {
        self.return_types
            .iter()
            .fold(Options::new(), |options, name| options.return_type(name))
            .lenient(self.lenient)
    }

    fn input_name(&self) -> String {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => path.display().to_string(),
            _ => "<stdin>".to_string(),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_source(args: &Args) -> io::Result<String> {
    match &args.input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path),
        _ => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

fn write_output(args: &Args, python: &str) -> io::Result<()> {
    match &args.output {
        Some(path) => fs::write(path, python),
        None => io::stdout().lock().write_all(python.as_bytes()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let name = args.input_name();
    let source = match read_source(&args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{name}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let python = match c2py::translate_with(&source, &args.options()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{name}: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = write_output(&args, &python) {
        let target = args
            .output
            .as_ref()
            .map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string());
        eprintln!("{target}: {e}");
        return ExitCode::FAILURE;
    }

    if let Some(path) = &args.output {
        tracing::info!(from = %name, to = %path.display(), "translation written");
    }

    ExitCode::SUCCESS
}
