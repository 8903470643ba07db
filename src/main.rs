use mapty::commands::Cli;
use mapty::libs::messages::macros::is_debug_mode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the log formatter when debug output is requested.
///
/// `RUST_LOG` wins when set; `MAPTY_DEBUG` alone means `mapty=debug`.
fn init_tracing() {
    if !is_debug_mode() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mapty=debug"));
    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    Cli::menu().await
}
