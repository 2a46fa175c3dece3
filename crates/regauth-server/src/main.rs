use anyhow::Context;
use clap::{Parser, Subcommand};
use regauth_core::User;
use regauth_server::{AppState, load_config, routes};
use regauth_token::{
    SigningSecret, TokenAuthority, TokenCategory, TokenVerifier, inspect_token_unverified,
};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "regauth", version, about = "Container registry token authority")]
struct Cli {
    /// Path to the config file.
    #[arg(long, env = "REGAUTH_CONFIG", default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Mint or inspect tokens offline.
    Token {
        #[command(subcommand)]
        cmd: TokenCommand,
    },
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Print an anonymous pull token.
    PublicPull,

    /// Print a token scoped to one user's namespace.
    Namespace {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        username: String,
        /// Token category (access, refresh, service, short-lived, ...).
        #[arg(long, default_value = "service")]
        category: String,
    },

    /// Decode a token and print its claims.
    Inspect {
        token: String,
        /// Skip signature, expiry and audience checks.
        #[arg(long)]
        unverified: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = load_config(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    match cli.cmd.unwrap_or(Command::Serve) {
        Command::Serve => {
            let state = Arc::new(AppState::init(&cfg).await?);
            let app = routes::router(state);

            tracing::info!(address = %cfg.server.bind, "regauth listening");
            let listener = tokio::net::TcpListener::bind(&cfg.server.bind).await?;
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        Command::Token { cmd } => {
            let authority = TokenAuthority::from_config(&cfg.authority)?;
            match cmd {
                TokenCommand::PublicPull => {
                    println!("{}", authority.issue_public_pull_token()?);
                }
                TokenCommand::Namespace {
                    user_id,
                    username,
                    category,
                } => {
                    let category = TokenCategory::parse(&category);
                    if category == TokenCategory::Unspecified {
                        tracing::warn!("unknown category, token gets the fallback lifetime");
                    }
                    let token = match category {
                        TokenCategory::Service => authority.issue_service_token(&User {
                            id: user_id,
                            username,
                            email: String::new(),
                            password: String::new(),
                        })?,
                        other => authority.issue_web_login_token(&user_id, &username, other)?,
                    };
                    println!("{token}");
                }
                TokenCommand::Inspect { token, unverified } => {
                    let claims = if unverified {
                        inspect_token_unverified(&token)?
                    } else {
                        let secret = SigningSecret::from_config(&cfg.authority.signing)?;
                        TokenVerifier::new(&cfg.authority.endpoint, &secret).verify(&token)?
                    };
                    println!("{}", serde_json::to_string_pretty(&claims)?);
                }
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
