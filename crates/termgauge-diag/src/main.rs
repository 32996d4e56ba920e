#![forbid(unsafe_code)]

//! Terminal size detection report.
//!
//! Prints stream attachment, the environment variables the resolver
//! consumes, each strategy's isolated answer, and the final resolution.
//! Reach for it when a user reports a wrong width.

use std::env;
use std::io::{self, IsTerminal};
use std::process;
use std::time::Duration;

use termgauge::{NATIVE_QUERY_SUPPORTED, SizeResolver, StdStream, Strategy};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
termgauge-diag: terminal size detection report

USAGE:
    termgauge-diag [OPTIONS]

OPTIONS:
    --stdout          Probe stdout instead of stderr
    --timeout-ms=N    Bound each subprocess probe to N milliseconds
    --help, -h        Show this help message
    --version, -V     Show version";

#[derive(Default)]
struct Opts {
    stream: StdStream,
    timeout: Option<Duration>,
}

fn parse_args() -> Opts {
    let mut opts = Opts::default();
    for arg in env::args().skip(1) {
        if arg == "--help" || arg == "-h" {
            println!("{HELP_TEXT}");
            process::exit(0);
        } else if arg == "--version" || arg == "-V" {
            println!("termgauge-diag {VERSION}");
            process::exit(0);
        } else if arg == "--stdout" {
            opts.stream = StdStream::Stdout;
        } else if let Some(value) = arg.strip_prefix("--timeout-ms=") {
            match value.parse::<u64>() {
                Ok(ms) => opts.timeout = Some(Duration::from_millis(ms)),
                Err(_) => bail(&format!("invalid --timeout-ms value: {value}")),
            }
        } else {
            bail(&format!("unknown option: {arg}"));
        }
    }
    opts
}

fn bail(message: &str) -> ! {
    eprintln!("termgauge-diag: {message}");
    eprintln!();
    eprintln!("{HELP_TEXT}");
    process::exit(2);
}

fn main() {
    let opts = parse_args();

    let mut resolver = SizeResolver::new().with_output(opts.stream);
    if let Some(timeout) = opts.timeout {
        resolver = resolver.with_command_timeout(timeout);
    }

    println!("termgauge-diag {VERSION}");
    println!();
    println!("streams");
    println!("  probing        {:?}", opts.stream);
    println!("  stdout is tty  {}", io::stdout().is_terminal());
    println!("  stderr is tty  {}", io::stderr().is_terminal());
    println!(
        "  native query   {}",
        if NATIVE_QUERY_SUPPORTED {
            "supported"
        } else {
            "unsupported"
        }
    );

    println!();
    println!("environment");
    for name in ["COLUMNS", "LINES", "ROWS", "ANSICON", "TERM"] {
        match env::var(name) {
            Ok(value) => println!("  {name:<8} {value:?}"),
            Err(_) => println!("  {name:<8} <unset>"),
        }
    }

    println!();
    println!("strategies");
    for strategy in Strategy::ALL {
        let answer = match resolver.probe(*strategy) {
            Some(size) => size.to_string(),
            None => "-".to_string(),
        };
        println!("  {:<13} {answer}", strategy.name());
    }

    println!();
    let size = resolver.size();
    let defaults = resolver.default_size();
    println!("resolved  {size}  ({} rows, {} columns)", size.rows, size.columns);
    println!(
        "fallback  {defaults}  ({} rows, {} columns)",
        defaults.rows, defaults.columns
    );
}
