//! Command handlers for the signed-in user's profile.
//!
//! There is no login flow; the account is identified by email, taken from
//! `--email` or `LINKD_USER_EMAIL`.

use clap::{Args, Subcommand};
use linkd_client::LinkdClient;
use linkd_core::ProfileUpdate;

use crate::search::headline;

/// Sub-commands available under `profile`.
#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show the stored profile
    Show,
    /// Check whether an account exists
    Exists,
    /// Change one or more profile fields
    Update(UpdateArgs),
    /// Delete the account and its profile
    Delete {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Fields accepted by `profile update`. Omitted flags are left unchanged.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub summary: Option<String>,
    #[arg(long)]
    pub linkedin_url: Option<String>,
    #[arg(long)]
    pub photo_url: Option<String>,
}

impl UpdateArgs {
    pub(crate) fn into_update(self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name,
            role: self.role,
            company: self.company,
            location: self.location,
            summary: self.summary,
            linkedin_url: self.linkedin_url,
            photo_url: self.photo_url,
        }
    }
}

/// Picks the `--email` flag over the configured address.
///
/// # Errors
///
/// Returns an error if neither is set.
pub(crate) fn resolve_email(
    flag: Option<&str>,
    configured: Option<&str>,
) -> anyhow::Result<String> {
    flag.or(configured)
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| anyhow::anyhow!("no account email; pass --email or set LINKD_USER_EMAIL"))
}

/// Print the stored profile for `email`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub(crate) async fn run_profile_show(client: &LinkdClient, email: &str) -> anyhow::Result<()> {
    let Some(profile) = client.user_profile(email).await? else {
        println!("no profile found for {email}");
        return Ok(());
    };

    println!("{} ({})", profile.display_name(), profile.id);
    if let Some(line) = headline(&profile) {
        println!("  {line}");
    }
    if let Some(summary) = profile.summary.as_deref() {
        println!();
        println!("  {summary}");
    }

    let experience = profile.experience_lines(5);
    if !experience.is_empty() {
        println!();
        println!("  Experience");
        for line in &experience {
            println!("    - {line}");
        }
    }
    let education = profile.education_lines(3);
    if !education.is_empty() {
        println!();
        println!("  Education");
        for line in &education {
            println!("    - {line}");
        }
    }
    if let Some(updated) = profile.updated_at {
        println!();
        println!("  last updated {}", updated.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the request fails.
pub(crate) async fn run_profile_exists(client: &LinkdClient, email: &str) -> anyhow::Result<()> {
    if client.user_exists(email).await? {
        println!("an account exists for {email}");
    } else {
        println!("no account for {email}");
    }
    Ok(())
}

/// Apply a partial update and echo the result.
///
/// # Errors
///
/// Returns an error if no fields were given or the request fails.
pub(crate) async fn run_profile_update(
    client: &LinkdClient,
    email: &str,
    update: &ProfileUpdate,
) -> anyhow::Result<()> {
    if update.is_empty() {
        anyhow::bail!("nothing to update; pass at least one field flag");
    }
    let profile = client.update_user_profile(email, update).await?;
    tracing::info!(profile_id = %profile.id, "profile updated");
    println!("updated {}", profile.display_name());
    Ok(())
}

/// Delete the account for `email`. Requires `--yes`.
///
/// # Errors
///
/// Returns an error if `--yes` was not passed or the request fails.
pub(crate) async fn run_profile_delete(
    client: &LinkdClient,
    email: &str,
    confirmed: bool,
) -> anyhow::Result<()> {
    if !confirmed {
        anyhow::bail!("refusing to delete {email} without --yes");
    }
    client.delete_user_profile(email).await?;
    tracing::info!("profile deleted");
    println!("deleted account {email}");
    Ok(())
}
