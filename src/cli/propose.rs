use super::{load_config, now, open_registry};
use agora::registry::VoterId;
use std::path::PathBuf;

/// Create a new proposal
///
/// The voting window opens immediately and closes after the configured
/// voting period. The deadline is fixed at creation; later config changes
/// do not move it.
pub async fn execute(
    title: String,
    description: String,
    proposer: String,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let registry = open_registry(&config).await?;

    let id = registry
        .create_proposal(&title, &description, VoterId::from(proposer.as_str()), now())
        .await?;
    let proposal = registry.get_proposal(id).await?;

    println!("✅ Proposal #{} created", id);
    println!();
    println!("  Title:    {}", proposal.title);
    println!("  Proposer: {}", proposal.proposer);
    println!("  Voting closes: {}", format_timestamp(proposal.end_date));

    Ok(())
}

/// Render a UNIX-seconds timestamp as RFC 3339 UTC.
pub(super) fn format_timestamp(secs: u64) -> String {
    let time = std::time::UNIX_EPOCH + std::time::Duration::from_secs(secs);
    humantime::format_rfc3339_seconds(time).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00Z");
        assert_eq!(format_timestamp(1_209_600), "1970-01-15T00:00:00Z");
    }
}
