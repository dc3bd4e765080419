use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use nr_client::{ActionOutcome, App, RemoteFetcher, SummaryOutcome};
use nr_core::{InferenceModel, Result};
use nr_scrapers::{HttpFetcher, ScraperManager};
use nr_web::AppState;
use tracing::{debug, error, info};

mod logging;
mod terminal;

use logging::init_logging;
use terminal::TerminalView;

#[derive(Parser, Debug)]
#[command(author, version, about = "Collect news articles and summarize them", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Where client state is kept: memory, file or sqlite
    #[arg(long, global = true, default_value = "file")]
    storage: String,
    #[arg(long, global = true, env = "NR_DATA_DIR", default_value = ".newsreader")]
    data_dir: PathBuf,
    #[arg(long, global = true, default_value = "deepseek", help = "Model used for summaries. Available models: deepseek (default), dummy")]
    model: String,
    /// Base URL of an OpenAI-compatible API
    #[arg(long, global = true, env = "NR_MODEL_URL")]
    model_url: Option<String>,
    #[arg(long, global = true, env = "NR_MODEL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// More output per occurrence (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the fetch service
    Serve(ServeArgs),
    #[command(flatten)]
    Client(ClientCommands),
}

#[derive(Subcommand, Debug)]
enum ClientCommands {
    /// Show or change the fetch service settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Fetch a page or feed through the fetch service
    AddUrl { url: String },
    /// Add an article from text
    AddText {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    List,
    Summarize { id: String },
    Remove { id: String },
    /// Run a named article action (summarize, remove)
    Action { action: String, id: String },
}

#[derive(Subcommand, Debug)]
enum SettingsCommands {
    Show,
    Set {
        #[arg(long)]
        url: String,
        #[arg(long)]
        key: String,
    },
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "NR_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
    /// Bearer token clients must present
    #[arg(long, env = "NR_FETCH_SECRET", hide_env_values = true)]
    secret: String,
    /// Upstream request timeout
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    #[arg(long, default_value_t = nr_scrapers::DEFAULT_MAX_FEED_ITEMS)]
    max_feed_items: usize,
}

impl ClientCommands {
    fn needs_model(&self) -> bool {
        matches!(self, ClientCommands::Summarize { .. } | ClientCommands::Action { .. })
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs))?;
    let scraper = ScraperManager::with_max_feed_items(Arc::new(fetcher), args.max_feed_items);
    info!("🦗 Scrapers initialized: {}", scraper.scraper_names().join(", "));
    nr_web::serve(args.bind, AppState::new(scraper, args.secret)).await
}

async fn build_model(global: &GlobalArgs, required: bool) -> Result<Arc<dyn InferenceModel>> {
    let config = nr_inference::Config {
        api_key: global.api_key.clone(),
        model_name: Some(global.model.clone()),
        model_url: global.model_url.clone(),
    };
    match nr_inference::create_model(Some(config)).await {
        Ok(model) => Ok(model),
        Err(e) if !required => {
            debug!(error = %e, "Summaries unavailable for this command");
            nr_inference::create_model(Some(nr_inference::Config {
                model_name: Some("dummy".to_string()),
                ..Default::default()
            }))
            .await
        }
        Err(e) => Err(e),
    }
}

fn storage_location(global: &GlobalArgs) -> PathBuf {
    if global.storage.eq_ignore_ascii_case("sqlite") {
        global.data_dir.join("newsreader.db")
    } else {
        global.data_dir.clone()
    }
}

async fn run_client(global: GlobalArgs, command: ClientCommands) -> Result<()> {
    let location = storage_location(&global);
    let storage = nr_storage::create_storage(&global.storage, location.to_str()).await?;
    info!("💾 Storage ready (using {})", global.storage);

    let model = build_model(&global, command.needs_model()).await?;
    let view = Arc::new(TerminalView::new(matches!(command, ClientCommands::List)));
    let app = App::start(storage, Arc::new(RemoteFetcher::new()), model, view).await?;

    match command {
        ClientCommands::Settings { command: SettingsCommands::Show } => match app.settings().current().await {
            Some(settings) if settings.is_configured() => {
                println!("url: {}", settings.url);
                println!("key: <set>");
            }
            _ => println!("Fetch service not configured"),
        },
        ClientCommands::Settings {
            command: SettingsCommands::Set { url, key },
        } => {
            let saved = app.save_settings(&url, &key).await?;
            println!("Saved fetch service {}", saved.url);
        }
        ClientCommands::AddUrl { url } => {
            let added = app.add_url(&url).await?;
            println!("Added {} article(s)", added);
        }
        ClientCommands::AddText { title, content } => {
            let article = app.add_text(&title, &content).await?;
            println!("Added {}", article.id);
        }
        ClientCommands::List => {}
        ClientCommands::Summarize { id } => report_summary(&id, app.summarize(&id).await?),
        ClientCommands::Remove { id } => report_removal(&id, app.remove(&id).await?),
        ClientCommands::Action { action, id } => match app.dispatch(&action, &id).await? {
            ActionOutcome::Summarized(outcome) => report_summary(&id, outcome),
            ActionOutcome::Removed(removed) => report_removal(&id, removed),
        },
    }
    Ok(())
}

fn report_summary(id: &str, outcome: SummaryOutcome) {
    match outcome {
        SummaryOutcome::Completed(_) => println!("Summarized {}", id),
        SummaryOutcome::InProgress => println!("A summary for {} is already in progress", id),
        SummaryOutcome::NotFound => eprintln!("! No article with id {}", id),
        SummaryOutcome::Failed(_) => {}
    }
}

fn report_removal(id: &str, removed: bool) {
    if removed {
        println!("Removed {}", id);
    } else {
        eprintln!("! No article with id {}", id);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let Cli { global, command } = Cli::parse();
    init_logging(global.verbose);

    let result = match command {
        Commands::Serve(args) => serve(args).await,
        Commands::Client(command) => run_client(global, command).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}
