use super::{load_config, now, open_registry};
use std::path::PathBuf;

/// List all proposals in id order
pub async fn execute(
    json: bool,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let registry = open_registry(&config).await?;

    let proposals = registry.proposals().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&proposals)?);
        return Ok(());
    }

    if proposals.is_empty() {
        println!("No proposals yet.");
        return Ok(());
    }

    let now = now();
    let quorum = registry.params().await.quorum;
    println!("📋 {} proposal(s)", proposals.len());
    println!();
    for proposal in &proposals {
        println!(
            "  #{:<4} {:<40} {:<7} for: {:<6} against: {:<6}",
            proposal.id,
            truncate(&proposal.title, 40),
            proposal.status(now, quorum).to_string(),
            proposal.votes_for,
            proposal.votes_against
        );
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
