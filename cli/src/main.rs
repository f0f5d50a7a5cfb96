//! dem - Docker environment management

use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use dem_cli::cli::Cli;
use dem_cli::domain::error::exit_code_for;
use dem_cli::output::json::format_error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    dem_cli::logging::init(cli.debug);
    let json = cli.json;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    match cli.run(cancel).await {
        Ok(code) => code,
        Err(e) => {
            let code = exit_code_for(&e);
            match format_error(&format!("{e:#}"), code) {
                Ok(obj) if json => println!("{obj}"),
                _ => {
                    eprintln!("Error: {e}");
                    for cause in e.chain().skip(1) {
                        eprintln!("  caused by: {cause}");
                    }
                }
            }
            ExitCode::from(code)
        }
    }
}
