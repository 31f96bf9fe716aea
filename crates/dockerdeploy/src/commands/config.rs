//! dockerdeploy config {show, set-token, reset}

use colored::Colorize;
use dockerdeploy_config::{ConfigStore, DeploymentConfigUpdate};

pub fn handle_show() -> anyhow::Result<()> {
    let store = ConfigStore::open()?;
    let config = store.config();

    println!(
        "{} {}",
        "Config file:".bold(),
        store.path().display().to_string().cyan()
    );
    println!();
    print_value("imageName", config.image_name.as_deref());
    print_value("tagBase", config.tag_base.as_deref());
    print_value(
        "apiToken",
        config.api_token.as_deref().map(mask_token).as_deref(),
    );
    print_value(
        "updatedAt",
        config.updated_at.map(|t| t.to_rfc3339()).as_deref(),
    );

    Ok(())
}

pub fn handle_set_token(token: &str) -> anyhow::Result<()> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("API token must not be empty");
    }

    let mut store = ConfigStore::open()?;
    store.update(DeploymentConfigUpdate::api_token(token))?;
    println!("{} API token saved", "✓".green());
    Ok(())
}

pub fn handle_reset() -> anyhow::Result<()> {
    let mut store = ConfigStore::open()?;
    store.update(DeploymentConfigUpdate::reset_publish_state())?;
    println!("{} Image name and published image cleared", "✓".green());
    Ok(())
}

fn print_value(key: &str, value: Option<&str>) {
    match value {
        Some(value) => println!("  {:<10} {}", key, value),
        None => println!("  {:<10} {}", key, "(not set)".dimmed()),
    }
}

/// Keep the first four characters
fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    format!("{}****", visible)
}
