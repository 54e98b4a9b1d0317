//! Show or write the configuration file.

use std::path::PathBuf;

use stickheat_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, path: Option<PathBuf>, write: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(config_file_path);

    if write {
        config.save_to(&path)?;
        println!("Config written to: {}", path.display());
        return Ok(());
    }

    let exists = path.exists();
    println!(
        "# {}{}",
        path.display(),
        if exists { "" } else { " (not found, showing defaults)" }
    );
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
