//! threadcell CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use threadcell_engine::Shutdown;
use threadcell_foundation::ErrorKind;
use threadcell_runtime::{Repl, RuntimeConfig, Session, logging};
use tracing::level_filters::LevelFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    trace: bool,
    no_prelude: bool,
    log_level: Option<LevelFilter>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--trace" => config.trace = true,
            "--no-prelude" => config.no_prelude = true,
            "--log-level" => {
                i += 1;
                if i >= args.len() {
                    return Err("--log-level requires a value".into());
                }
                config.log_level = Some(
                    args[i]
                        .parse()
                        .map_err(|_| format!("invalid --log-level value: {}", args[i]))?,
                );
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(ExitCode::SUCCESS);
    }

    if cli.show_version {
        println!("threadcell {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = RuntimeConfig::new()
        .with_prelude(!cli.no_prelude)
        .with_banner(cli.files.is_empty());
    // Step tracing is emitted at TRACE, so it needs a matching log level.
    let default_level = if cli.trace {
        LevelFilter::TRACE
    } else {
        config.log_level
    };
    config = config.with_log_level(cli.log_level.unwrap_or(default_level));
    config.engine = config.engine.with_trace_steps(cli.trace);

    logging::init(config.log_level)?;

    let mut session = Session::with_config(config)?;

    let mut failed = false;
    for file in &cli.files {
        match session.load_file(file) {
            Ok(Shutdown::Bye) => return Ok(ExitCode::SUCCESS),
            Ok(_) => {}
            Err(e) => {
                failed = true;
                // Engine errors were already reported on the console.
                if matches!(e.kind, ErrorKind::Io(_)) {
                    eprintln!("\x1b[31mError: {e}\x1b[0m");
                }
            }
        }
    }

    if cli.batch_mode {
        return Ok(if failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    let mut repl = Repl::new(session)?;
    repl.run()?;
    println!();
    Ok(ExitCode::SUCCESS)
}

fn print_help() {
    println!(
        "\x1b[1mthreadcell\x1b[0m - Threaded-code Forth-family interpreter

\x1b[1mUSAGE:\x1b[0m
    threadcell [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Source files to run before starting the REPL

\x1b[1mOPTIONS:\x1b[0m
    -h, --help           Print help information
    -V, --version        Print version information
    -b, --batch          Run files and exit (no REPL)
    --no-prelude         Skip the IF/BEGIN/HEX prelude
    --log-level LEVEL    Log to stderr at LEVEL (off, error, warn, info, debug, trace)
    --trace              Log every engine step (implies --log-level trace)

\x1b[1mEXAMPLES:\x1b[0m
    threadcell                     Start interactive REPL
    threadcell lib.fs              Run lib.fs, then start REPL
    threadcell -b test.fs          Run test.fs and exit
    threadcell --trace -b tiny.fs  Run with per-step tracing

\x1b[1mREPL:\x1b[0m
    WORDS          List visible words
    SEE name       Decompile a word
    BYE            Exit
    Ctrl+D         Exit
    Ctrl+C         Cancel the current line"
    );
}
