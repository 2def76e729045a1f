//! Pairwise comparison command handlers.

use clap::Subcommand;
use linkd_client::LinkdClient;
use linkd_core::{Profile, VoteOutcome};

use crate::search::headline;

/// Sub-commands available under `elo`.
#[derive(Debug, Subcommand)]
pub enum EloCommands {
    /// Fetch a random pair of profiles to compare
    Pair,
    /// Record which of two profiles is the better match
    Vote {
        /// Id of the left-hand profile
        left: String,
        /// Id of the right-hand profile
        right: String,
        /// Winner: left, right or equal
        result: VoteOutcome,
    },
}

fn print_side(label: &str, profile: &Profile) {
    println!("{label}: {} ({})", profile.display_name(), profile.id);
    if let Some(line) = headline(profile) {
        println!("       {line}");
    }
}

/// Print a comparison pair with the command that votes on it.
///
/// # Errors
///
/// Returns an error if the pair cannot be fetched or is malformed.
pub(crate) async fn run_elo_pair(client: &LinkdClient) -> anyhow::Result<()> {
    let pair = client.elo_pair().await?;
    print_side("left ", &pair.left);
    print_side("right", &pair.right);
    println!();
    println!(
        "vote with: linkd elo vote {} {} <left|right|equal>",
        pair.left.id, pair.right.id
    );
    Ok(())
}

/// Submit a vote and print the rating changes.
///
/// # Errors
///
/// Returns an error if the vote is rejected locally or by the server.
pub(crate) async fn run_elo_vote(
    client: &LinkdClient,
    left: &str,
    right: &str,
    result: VoteOutcome,
) -> anyhow::Result<()> {
    let outcome = client.elo_vote(left, right, result).await?;
    tracing::info!(left, right, %result, "vote recorded");

    println!("{:<8}{:>10}{:>10}", "PROFILE", "RATING", "CHANGE");
    println!(
        "{:<8}{:>10.1}{:>+10.1}",
        "left", outcome.new_ratings.profile_a, outcome.elo_changes.profile_a
    );
    println!(
        "{:<8}{:>10.1}{:>+10.1}",
        "right", outcome.new_ratings.profile_b, outcome.elo_changes.profile_b
    );
    Ok(())
}
