use std::fs::{self, OpenOptions};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use prompt_core::{Config, HttpGenerateClient, Outcome, SubmissionHandler};

mod app;
mod console;
mod handler;
mod tui;
mod ui;

use app::App;
use console::ConsoleView;
use tui::EventHandler;

#[derive(Parser)]
#[command(name = "prompt")]
#[command(about = "Send prompts to the text generation backend and read the answers")]
struct Cli {
    /// Backend base URL (overrides config and PROMPT_BACKEND_URL)
    #[arg(short, long, global = true)]
    backend: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive console (default)
    Console,
    /// Send a single prompt and print the response
    Ask {
        /// The prompt text
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::load()?;
    if config.debug {
        init_file_logging()?;
    }

    let backend_url = cli.backend.unwrap_or(config.backend_url);
    tracing::debug!(%backend_url, "starting prompt console");

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => {
            run_console(&backend_url).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Ask { prompt } => {
            let handler = SubmissionHandler::new(HttpGenerateClient::new(&backend_url));
            match handler.submit(&prompt, &mut ConsoleView).await {
                Outcome::Succeeded => Ok(ExitCode::SUCCESS),
                Outcome::Rejected | Outcome::Failed => Ok(ExitCode::FAILURE),
            }
        }
    }
}

async fn run_console(backend_url: &str) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let mut app = App::new(backend_url);
    let mut events = EventHandler::new();
    let sender = events.sender();

    let result: Result<()> = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&app, frame))?;

            match events.next().await {
                Some(event) => handler::handle_event(&mut app, event, &sender),
                None => break,
            }
        }
        Ok(())
    }
    .await;

    tui::restore()?;
    result
}

/// The terminal is taken by the UI, so logs go to a file under the data dir.
fn init_file_logging() -> Result<()> {
    let log_dir = dirs::data_dir()
        .ok_or_else(|| anyhow!("Could not determine data directory"))?
        .join("prompt-console");
    fs::create_dir_all(&log_dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("prompt.log"))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}
