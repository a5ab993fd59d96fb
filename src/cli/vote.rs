use super::{load_config, now, open_registry, VoteChoice};
use agora::registry::VoterId;
use std::path::PathBuf;

/// Cast a vote on a proposal
///
/// One vote per identity per proposal. Duplicate votes and votes after the
/// deadline are rejected without changing anything.
pub async fn execute(
    proposal_id: u64,
    choice: VoteChoice,
    voter: String,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let registry = open_registry(&config).await?;

    registry
        .vote(
            proposal_id,
            choice.support(),
            VoterId::from(voter.as_str()),
            now(),
        )
        .await?;
    let proposal = registry.get_proposal(proposal_id).await?;

    let direction = match choice {
        VoteChoice::For => "for",
        VoteChoice::Against => "against",
    };
    println!("🗳️  Vote {} recorded on proposal #{}", direction, proposal_id);
    println!();
    println!(
        "  For: {}  Against: {}  Voters: {}",
        proposal.votes_for, proposal.votes_against, proposal.total_voters
    );

    Ok(())
}
