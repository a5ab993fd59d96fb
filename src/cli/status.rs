use super::{load_config, now, open_registry};
use agora::registry::ProposalStatus;
use std::path::PathBuf;

/// Show a proposal's current status
///
/// The status is derived on demand from the stored tallies and the wall
/// clock. Nothing is cached, so the answer can change from Active to
/// Passed or Failed between invocations without any write in between.
pub async fn execute(
    proposal_id: u64,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let registry = open_registry(&config).await?;

    let status = registry.status(proposal_id, now()).await?;
    let marker = match status {
        ProposalStatus::Active => "🟢",
        ProposalStatus::Passed => "✅",
        ProposalStatus::Failed => "❌",
    };
    println!("{} Proposal #{}: {}", marker, proposal_id, status);

    Ok(())
}
