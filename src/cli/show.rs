use super::propose::format_timestamp;
use super::{load_config, now, open_registry};
use std::path::PathBuf;

/// Show a proposal's full record
pub async fn execute(
    proposal_id: u64,
    json: bool,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let registry = open_registry(&config).await?;

    let proposal = registry.get_proposal(proposal_id).await?;
    let status = registry.status(proposal_id, now()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&proposal)?);
        return Ok(());
    }

    println!("📋 Proposal #{}", proposal.id);
    println!();
    println!("  Title:       {}", proposal.title);
    println!("  Description: {}", proposal.description);
    println!("  Proposer:    {}", proposal.proposer);
    println!("  Created:     {}", format_timestamp(proposal.created_at));
    println!("  Closes:      {}", format_timestamp(proposal.end_date));
    println!("  Status:      {}", status);
    println!();
    println!(
        "  For: {}  Against: {}  Voters: {}",
        proposal.votes_for, proposal.votes_against, proposal.total_voters
    );

    Ok(())
}
