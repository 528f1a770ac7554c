//! `config show`: the effective configuration with secrets masked.

use std::path::Path;

use anyhow::Result;
use console::style;

use agentforge_types::config::AppConfig;

pub fn show_config(config: &AppConfig, data_dir: &Path, json: bool) -> Result<()> {
    let redacted = config.redacted();
    if json {
        let value = serde_json::json!({
            "dataDir": data_dir.display().to_string(),
            "config": redacted,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("Data directory:").bold(),
        style(data_dir.display()).cyan()
    );
    println!();
    print!("{}", toml::to_string_pretty(&redacted)?);
    println!();
    Ok(())
}
