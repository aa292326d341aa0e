use std::time::Duration;

use clap::Parser;
use miette::IntoDiagnostic;
use shiftwatch_server::{web, AppState, Cli};
use tokio_graceful_shutdown::{SubsystemBuilder, Toplevel};

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let workplace = cli.load_workplace()?;
    if workplace.is_none() {
        log::warn!("No workplace configured yet; clock-ins are refused until one is set");
    }
    let state = AppState::new(workplace);
    let addr = cli.socket_addr();

    Toplevel::new(move |s| async move {
        s.start(SubsystemBuilder::new("Webserver", move |subsys| {
            web::serve(subsys, addr, state)
        }));
    })
    .catch_signals()
    .handle_shutdown_requests(Duration::from_millis(3000))
    .await
    .into_diagnostic()
}
