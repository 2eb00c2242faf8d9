use clap::{Parser, Subcommand};
use model_bot_bridge::adapters::{FilesystemProjectResolver, PythonProcessSession};
use model_bot_bridge::application::{BotCommandRouter, BotRegistry, QUESTION_PARAMETER};
use model_bot_bridge::config::AppConfig;
use model_bot_bridge::domain::foundation::{CommandMetadata, InsightId, ProjectId};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "model-bot")]
#[command(about = "Load a project's model bot into a Python session and ask it questions")]
struct Cli {
    /// Project whose bot files and engine settings are used
    #[arg(short, long, global = true)]
    project: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Make sure the bot exists, reporting whether it already did
    Load,
    /// Ask a single question
    Ask {
        /// Percent-encoded question
        #[arg(short, long)]
        question: String,
    },
    /// Ask questions read line by line from stdin
    Chat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let subscriber = tracing_subscriber::fmt().with_env_filter(config.logging.env_filter());
    if config.logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let cli = Cli::parse();

    let mut metadata = CommandMetadata::new(InsightId::new());
    if let Some(project) = config.projects.default_project_id() {
        metadata = metadata.with_project(project);
    }
    if let Some(project) = cli.project {
        metadata = metadata.with_context_project(ProjectId::new(project)?);
    }

    let session = Arc::new(PythonProcessSession::spawn(&config.python_session_config()).await?);
    info!("Python session started");

    let router = BotCommandRouter::for_session(
        Arc::new(FilesystemProjectResolver::new(config.projects.root_path())),
        session.clone(),
        Arc::new(BotRegistry::new()),
        config.bot_settings()?,
    );

    let outcome = match cli.command {
        Commands::Load => load(&router, &metadata).await,
        Commands::Ask { question } => ask(&router, &metadata, &question).await,
        Commands::Chat => chat(&router, &metadata).await,
    };

    if let Err(e) = session.shutdown().await {
        error!("Failed to stop Python session: {}", e);
    }
    outcome
}

async fn load(
    router: &BotCommandRouter,
    metadata: &CommandMetadata,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = router
        .dispatch("LoadBot", &HashMap::new(), metadata.clone())
        .await?;
    println!("{}", output.value);
    Ok(())
}

async fn ask(
    router: &BotCommandRouter,
    metadata: &CommandMetadata,
    question: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    router
        .dispatch("LoadBot", &HashMap::new(), metadata.clone())
        .await?;

    let parameters = HashMap::from([(QUESTION_PARAMETER.to_string(), question.to_string())]);
    let output = router.dispatch("RunBot", &parameters, metadata.clone()).await?;
    println!("{}", output.value);
    Ok(())
}

async fn chat(
    router: &BotCommandRouter,
    metadata: &CommandMetadata,
) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = router
        .dispatch("LoadBot", &HashMap::new(), metadata.clone())
        .await?;
    println!("Bot ready (already loaded: {})", loaded.value);
    println!("Type 'quit' or 'exit' to end the conversation.\n");

    let stdin = io::stdin();
    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        let parameters = HashMap::from([(
            QUESTION_PARAMETER.to_string(),
            urlencoding::encode(line).into_owned(),
        )]);
        match router.dispatch("RunBot", &parameters, metadata.clone()).await {
            Ok(output) => println!("Bot: {}\n", output.value),
            Err(e) => error!("Query failed: {}", e),
        }
    }

    Ok(())
}
