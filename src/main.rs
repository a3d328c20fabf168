use std::fs::File;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::{error, info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use tangerine::api::{HttpClient, PractitionersApi, ProductsApi, Transport};
use tangerine::core::config::{ResolvedConfig, load_config, resolve};
use tangerine::core::state::App;
use tangerine::tui;

#[derive(Parser)]
#[command(name = "tangerine", about = "Browse wellness practitioners and products")]
struct Args {
    /// API base URL (overrides config file and TANGERINE_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Log level written to tangerine.log (error, warn, info, debug, trace)
    #[arg(long, default_value = "debug")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy, Debug, Default)]
enum Command {
    /// Open the terminal interface
    #[default]
    Tui,
    /// Check that the API is reachable and print its status
    Health,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to tangerine.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    let level = args.log_level.parse().unwrap_or(LevelFilter::Debug);

    if let Ok(log_file) = File::create("tangerine.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            warn!("Ignoring config file: {}", e);
            Default::default()
        }
    };
    let resolved = resolve(&config, args.base_url.as_deref());
    let command = args.command.unwrap_or_default();

    info!(
        "Tangerine starting up: {:?} against {}",
        command, resolved.base_url
    );

    let client = HttpClient::new(&resolved.base_url, resolved.timeout, resolved.log_requests);
    let transport = match client {
        Ok(client) => Arc::new(client) as Arc<dyn Transport>,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    match command {
        Command::Tui => run_tui(transport, &resolved),
        Command::Health => {
            if !health(transport).await {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn run_tui(transport: Arc<dyn Transport>, config: &ResolvedConfig) -> std::io::Result<()> {
    let (app, mount) = App::mount(
        PractitionersApi::new(transport.clone()),
        ProductsApi::new(transport),
        config,
    );
    tui::run(app, mount)
}

async fn health(transport: Arc<dyn Transport>) -> bool {
    match PractitionersApi::new(transport).health_check().await {
        Ok(status) => {
            println!("status:  {}", status.status);
            println!("service: {}", status.service);
            true
        }
        Err(e) => {
            eprintln!("{}", e);
            false
        }
    }
}
