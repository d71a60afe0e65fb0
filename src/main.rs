use std::io;
use std::process;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use termux_cli::cli::commands::{build_registry, run};
use termux_cli::cli::output;
use termux_cli::exitcode;

fn main() {
    let registry = match build_registry() {
        Ok(registry) => registry,
        Err(e) => {
            output::failure(&e, false);
            process::exit(e.exit_code());
        }
    };

    let invocation = match registry.resolve(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(e) => {
            output::failure(&e, false);
            process::exit(e.exit_code());
        }
    };
    let ctx = &invocation.context;

    setup_logging(ctx.debug);
    if ctx.verbose {
        output::note("Verbose mode enabled");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = match run(&registry, &invocation, &mut out) {
        Ok(()) => exitcode::OK,
        Err(e) => {
            output::failure(&e, ctx.verbose);
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

    // dependency internals are only interesting at trace level
    let noisy_modules = ["config", "clap"];
    let module_filter = filter_fn(move |metadata| {
        filter == LevelFilter::TRACE
            || !noisy_modules
                .iter()
                .any(|name| metadata.target().starts_with(name))
    });

    // Logs go to stderr; stdout carries only rendered output
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_names(false);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
