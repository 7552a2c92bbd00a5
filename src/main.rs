use clap::{Parser, Subcommand};
use modelql::error::Result;

mod cli;

#[derive(Parser)]
#[command(name = "modelql")]
#[command(version = "0.1.0")]
#[command(about = "Turn declarative data models into GraphQL APIs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate example configuration and seed data
    Init {
        /// Output config file path (if not specified, outputs to stdout)
        #[arg(long)]
        output: Option<String>,

        /// Directory to write JSON seed data into
        #[arg(long, default_value = "data")]
        data_dir: String,
    },

    /// Start GraphQL server
    Serve {
        /// Config file path
        #[arg(long, default_value = "modelql.toml")]
        config: String,

        /// Server port
        #[arg(long, default_value_t = 4000)]
        port: u16,
    },

    /// Print the generated GraphQL SDL
    Sdl {
        /// Config file path
        #[arg(long, default_value = "modelql.toml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { output, data_dir } => {
            cli::init::run(output, data_dir).await?;
        }
        Commands::Serve { config, port } => {
            cli::serve::run(config, port).await?;
        }
        Commands::Sdl { config } => {
            cli::sdl::run(config).await?;
        }
    }

    Ok(())
}
