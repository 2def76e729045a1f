//! Leaderboard command handler.

use linkd_client::LinkdClient;

/// Print a page of the rating leaderboard.
///
/// Ranks are absolute, so `--skip 10` starts at rank 11.
///
/// # Errors
///
/// Returns an error if the request fails.
pub(crate) async fn run_leaderboard(
    client: &LinkdClient,
    limit: u32,
    skip: u32,
) -> anyhow::Result<()> {
    let entries = client.leaderboard(limit, skip).await?;

    if entries.is_empty() {
        println!("no rated profiles yet; vote with `linkd elo pair`");
        return Ok(());
    }

    println!("{:<6}{:<9}{:<28}ROLE", "RANK", "RATING", "NAME");
    for (rank, entry) in (u64::from(skip) + 1..).zip(&entries) {
        let name = entry.name.as_deref().unwrap_or("Unknown");
        let name_display = if name.chars().count() > 26 {
            format!("{}...", name.chars().take(23).collect::<String>())
        } else {
            name.to_string()
        };
        println!(
            "{:<6}{:<9.0}{:<28}{}",
            rank,
            entry.rating,
            name_display,
            entry.role.as_deref().unwrap_or("\u{2014}")
        );
    }
    Ok(())
}
