//! dockerdeploy deploy

use dockerdeploy_config::ConfigStore;
use dockerdeploy_core::{DeployOutcome, Deployer};

pub async fn handle() -> anyhow::Result<()> {
    let store = ConfigStore::open()?;
    let api = super::api_client(&store);

    match Deployer::new(&api).run(&store).await? {
        DeployOutcome::Deployed(deployment) => {
            tracing::info!("deployment {} started", deployment.id);
        }
        DeployOutcome::NotPublished => {
            tracing::debug!("deploy skipped: nothing published");
        }
    }

    Ok(())
}
