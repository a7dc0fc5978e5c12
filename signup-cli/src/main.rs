mod cli;
mod report;
mod submit;

use std::net::SocketAddr;
use std::process::ExitCode;

use clap::Parser;
use signup_lib::{ServerConfig, SignupServer};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use tokio_util::sync::CancellationToken;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = TermLogger::init(
        cli.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    match cli.command {
        Commands::Serve { addr, taken } => serve(addr, taken).await,
        Commands::Submit(args) => submit::run(args).await,
    }
}

async fn serve(addr: SocketAddr, taken: Vec<String>) -> ExitCode {
    let mut config = ServerConfig::new().with_addr(addr);
    if !taken.is_empty() {
        config = config.with_taken_usernames(taken);
    }

    let server = match SignupServer::bind(&config).await {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Ok(bound) = server.local_addr() {
        println!("Listening on http://{}", bound);
    }

    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    match server.run(cancel).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
