use clap::Parser;
use recipe_search::{
    cli::{commands, Cli, Commands},
    config::Settings,
    search::SearchParams,
    Result,
};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    if let Err(e) = run() {
        error!("{}", e.log_safe());
        eprintln!("Error: {e}");
        std::process::exit(if e.is_client_error() { 2 } else { 1 });
    }
}

fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging; stdout is reserved for results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipe_search=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let mut settings = Settings::from_env()?;
    if let Some(corpus) = cli.corpus {
        settings.corpus.path = corpus;
    }
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Search {
            query,
            ingredients,
            exclude,
            alpha,
            beta,
            top_k,
            json,
        } => {
            let params = SearchParams {
                q: query,
                ingredients,
                exclude,
                alpha,
                beta,
                top_k,
            };
            let ranker = commands::load_ranker(&settings)?;
            commands::search(&ranker, params, &settings.search, json)?;
        }
        Commands::Prepare { input, output } => {
            let tokenizer = commands::build_tokenizer(&settings)?;
            commands::prepare(&input, &output, &tokenizer)?;
        }
        Commands::Stats => {
            let ranker = commands::load_ranker(&settings)?;
            commands::stats(&ranker)?;
        }
    }

    Ok(())
}
