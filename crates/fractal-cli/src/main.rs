use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use fractal_core::{FractalConfig, GenerationClient, GenerationRequest, ProjectStore, Studio};
use fractal_server::AppState;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "fractal", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Fractal UI studio server
    Serve {
        /// Port to listen on (overrides FRACTAL_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate a component from a description, without the server
    Generate {
        /// What to build, in plain language
        description: String,

        /// Output file path (optional, prints to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// AI provider to use
        #[arg(long, value_enum, default_value_t = ProviderType::Openai)]
        provider: ProviderType,

        /// Model name (optional, uses provider default if not specified)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Manage saved projects
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List saved projects, newest first
    List,

    /// Delete a project by id
    Delete { id: String },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum ProviderType {
    Openai,
    Anthropic,
    Ollama,
}

impl ProviderType {
    fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Openai => "openai",
            ProviderType::Anthropic => "anthropic",
            ProviderType::Ollama => "ollama",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = FractalConfig::from_env();

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.port);

            info!("Initializing AI provider: {}", config.provider);
            let provider =
                fractal_ai::provider_for(&config.provider, config.model.as_deref())
                    .context("Failed to initialize AI provider")?;

            let client =
                GenerationClient::new(provider).with_sampling(config.sampling());
            let studio = Studio::new(client);
            let store = ProjectStore::new(&config.store_path);

            fractal_server::start(AppState::new(studio, store), port)
                .await
                .context("Server error")?;
        }

        Commands::Generate {
            description,
            output,
            provider,
            model,
        } => {
            info!("Initializing AI provider: {:?}", provider);
            let provider = fractal_ai::provider_for(provider.as_str(), model.as_deref())
                .context("Failed to initialize AI provider")?;

            let client =
                GenerationClient::new(provider).with_sampling(config.sampling());
            let request = GenerationRequest::new(description)
                .context("Invalid description")?;

            info!("Generating component... (this may take a while)");
            let source = client
                .generate(&request)
                .await
                .context("Code generation failed")?;

            if let Some(out_path) = output {
                tokio::fs::write(&out_path, &source)
                    .await
                    .context("Failed to write output file")?;
                info!("Success! Output written to {:?}", out_path);
            } else {
                println!("{}", source);
            }
        }

        Commands::Projects { command } => {
            let store = ProjectStore::new(&config.store_path);

            match command {
                ProjectCommands::List => {
                    let projects = store.list().await.context("Failed to read projects")?;
                    if projects.is_empty() {
                        println!("No saved projects.");
                    }
                    for project in projects {
                        println!(
                            "{}  {}  ({})",
                            project.id,
                            project.title,
                            project.created_at.format("%Y-%m-%d %H:%M")
                        );
                    }
                }
                ProjectCommands::Delete { id } => {
                    if store.delete(&id).await.context("Failed to delete project")? {
                        println!("Deleted {}", id);
                    } else {
                        println!("No project with id {}", id);
                    }
                }
            }
        }
    }

    Ok(())
}
