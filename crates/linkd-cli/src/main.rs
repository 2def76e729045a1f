mod elo;
mod leaderboard;
mod profile;
mod search;

use clap::{Parser, Subcommand};
use linkd_client::{CancelToken, LinkdClient, MAX_LEADERBOARD_LIMIT};
use tracing_subscriber::EnvFilter;

use crate::elo::EloCommands;
use crate::profile::ProfileCommands;

#[derive(Debug, Parser)]
#[command(name = "linkd")]
#[command(about = "Search alumni profiles and explain why they match")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search profiles and stream explanations for the latest results
    Search {
        /// Free-text query, e.g. "Alumni in tech"
        query: String,
        /// Number of result pages to load
        #[arg(long, default_value = "1")]
        pages: u32,
        /// Skip live explanations and show stored ones only
        #[arg(long)]
        no_explain: bool,
    },
    /// Stream an explanation for a single profile
    Explain {
        /// Query the profile should be explained against
        query: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        summary: Option<String>,
    },
    /// Pairwise comparisons
    Elo {
        #[command(subcommand)]
        command: EloCommands,
    },
    /// Show the rating leaderboard
    Leaderboard {
        /// Number of entries to show (max 100)
        #[arg(long, default_value = "10")]
        limit: u32,
        /// Number of entries to skip
        #[arg(long, default_value = "0")]
        skip: u32,
    },
    /// Manage the signed-in user's profile
    Profile {
        /// Account email (defaults to `LINKD_USER_EMAIL`)
        #[arg(long, global = true)]
        email: Option<String>,
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("linkd ready; run `linkd --help` for commands");
        return Ok(());
    };

    // `load_app_config` reads `.env` itself.
    let config = linkd_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, api_url = %config.api_url, "configuration loaded");

    let client = LinkdClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build API client: {e}"))?;

    match command {
        Commands::Search {
            query,
            pages,
            no_explain,
        } => {
            let cancel = cancel_on_ctrl_c();
            let window = if no_explain {
                0
            } else {
                config.annotation_window
            };
            search::run_search(&client, &query, pages, window, &cancel, &mut std::io::stdout())
                .await?;
        }
        Commands::Explain {
            query,
            name,
            role,
            company,
            summary,
        } => {
            let cancel = cancel_on_ctrl_c();
            let profile = linkd_core::ProfileSummary {
                name: name.unwrap_or_default(),
                role: role.unwrap_or_default(),
                company: company.unwrap_or_default(),
                summary: summary.unwrap_or_default(),
            };
            search::run_explain(&client, &query, &profile, &cancel, &mut std::io::stdout()).await?;
        }
        Commands::Elo { command } => match command {
            EloCommands::Pair => elo::run_elo_pair(&client).await?,
            EloCommands::Vote { left, right, result } => {
                elo::run_elo_vote(&client, &left, &right, result).await?;
            }
        },
        Commands::Leaderboard { limit, skip } => {
            if limit > MAX_LEADERBOARD_LIMIT {
                tracing::warn!(limit, max = MAX_LEADERBOARD_LIMIT, "limit capped");
            }
            leaderboard::run_leaderboard(&client, limit, skip).await?;
        }
        Commands::Profile { email, command } => {
            let email = profile::resolve_email(email.as_deref(), config.user_email.as_deref())?;
            match command {
                ProfileCommands::Show => profile::run_profile_show(&client, &email).await?,
                ProfileCommands::Exists => profile::run_profile_exists(&client, &email).await?,
                ProfileCommands::Update(fields) => {
                    profile::run_profile_update(&client, &email, &fields.into_update()).await?;
                }
                ProfileCommands::Delete { yes } => {
                    profile::run_profile_delete(&client, &email, yes).await?;
                }
            }
        }
    }

    Ok(())
}

/// Returns a token that is cancelled on the first Ctrl-C.
///
/// In-flight requests are not aborted; the stream consumer stops applying
/// chunks at its next read.
fn cancel_on_ctrl_c() -> CancelToken {
    let cancel = CancelToken::new();
    let signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("cancellation requested");
            signal.cancel();
        }
    });
    cancel
}

#[cfg(test)]
mod tests;
