mod cli;
mod commands;
mod render;

use anyhow::Result;
use backend_client::BackendApiClient;
use clap::Parser;
use cli::Args;
use commands::{Command, Flow};
use session::{Intent, Orchestrator};
use std::io::Write;
use threadscope_core::ErrorExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.load_config().map_err(|e| {
        eprintln!("{}", e.user_friendly_message());
        e
    })?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Threadscope against {}", config.backend_url);

    let client = BackendApiClient::new(&config)?;
    let mut orchestrator = Orchestrator::new(client);
    orchestrator.dispatch(Intent::LoadAudiences).await;

    println!("Threadscope - ask Reddit a question. Type 'help' for commands.");
    print!("{}", render::render_audiences(orchestrator.session()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("threadscope> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e.user_friendly_message());
                continue;
            }
        };

        let lists_audiences = matches!(command, Command::Audiences | Command::Create);
        match commands::run(&mut orchestrator, command).await {
            Flow::Quit => break,
            Flow::Help => println!("{}", commands::HELP),
            Flow::Continue => {
                print!("{}", render::render(orchestrator.session()));
                if lists_audiences {
                    print!("{}", render::render_audiences(orchestrator.session()));
                }
            }
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}
