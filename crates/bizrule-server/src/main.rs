use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path (TOML); `BIZRULE__*` env vars override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the business rule API
    Serve,
    /// Print a bearer token for a staff account
    IssueToken {
        /// Token subject (user id)
        subject: String,
        /// Roles to embed; defaults to `staff`
        #[arg(long = "role")]
        roles: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = bizrule_server::AppConfig::load(args.config.as_deref())?;

    // Initialize tracing
    bizrule_server::init_tracing(&config.logging.level);
    tracing::info!(config = ?args.config, "Starting business rule server");

    bizrule_core::init();

    match args.command {
        Command::Serve => bizrule_server::run(config).await,
        Command::IssueToken { subject, roles } => {
            let token = bizrule_server::issue_token(&config, &subject, roles)?;
            println!("{}", token);
            Ok(())
        }
    }
}
