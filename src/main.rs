use std::process;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use floorcalc::cli::commands::execute_command;
use floorcalc::cli::{output, Cli};
use floorcalc::exitcode;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let code = match execute_command(&cli) {
        Ok(()) => exitcode::OK,
        Err(e) => {
            output::error(&e);
            e.exit_code()
        }
    };
    process::exit(code);
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // Logs go to stderr; stdout carries the rendered estimate
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorcalc::cli::Commands;
    use floorcalc::util::testing;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup();
    }

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn given_estimate_flags_when_parsing_then_raw_values_kept() {
        let cli = Cli::try_parse_from([
            "floorcalc",
            "estimate",
            "--area",
            "-5",
            "--transitions",
            "2",
            "--old-floor",
            "-f",
            "html",
        ])
        .expect("parse");
        match cli.command {
            Commands::Estimate(args) => {
                assert_eq!(args.area.as_deref(), Some("-5"));
                assert_eq!(args.transitions.as_deref(), Some("2"));
                assert!(args.old_floor);
                assert!(!args.prep);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn given_repeated_verbose_flag_when_parsing_then_counted() {
        let cli = Cli::try_parse_from(["floorcalc", "-vv", "prices"]).expect("parse");
        assert_eq!(cli.verbose, 2);
    }
}
