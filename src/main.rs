use clap::Parser;
use pwshelter::cli::{self, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = cli::run(cli) {
        cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn init_tracing() {
    // Diagnostics go to stderr and stay quiet unless RUST_LOG asks for more.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
