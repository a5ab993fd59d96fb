use super::config::{default_config_path, default_db_path, AgoraConfig};
use std::path::PathBuf;

/// Initialize a registry database location and configuration file
///
/// Writes a commented config file with the default governance parameters
/// (14-day voting window, quorum of 1000). The database itself is created
/// lazily on first use.
pub fn execute(
    config: Option<PathBuf>,
    db_path: Option<PathBuf>,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let config_path = config.unwrap_or_else(|| default_config_path(&db_path));

    if config_path.exists() && !force {
        return Err(format!(
            "Config file already exists at '{}'. Use --force to overwrite.",
            config_path.display()
        )
        .into());
    }

    AgoraConfig::create_default(&config_path, &db_path)?;

    println!("✅ Initialized Agora registry");
    println!();
    println!("  Config:   {}", config_path.display());
    println!("  Database: {}", db_path.display());
    println!();
    println!("Create your first proposal with:");
    println!("  agora propose --title \"...\" --description \"...\" --as <identity>");

    Ok(())
}
