//! dockerdeploy publish

use crate::prompt::TerminalPrompter;
use dockerdeploy_build::{ContainerEngine, HostArch, SystemRunner};
use dockerdeploy_config::ConfigStore;
use dockerdeploy_core::{PublishOptions, PublishOutcome, Publisher};
use std::path::PathBuf;
use std::sync::Arc;

pub async fn handle(dockerfile: PathBuf, versions: Vec<String>, yes: bool) -> anyhow::Result<()> {
    let mut store = ConfigStore::open()?;
    let api = super::api_client(&store);
    let engine = ContainerEngine::from_env(Arc::new(SystemRunner));
    let prompter = TerminalPrompter;
    let arch = HostArch::current();

    tracing::debug!(
        "publish: engine={} arch={:?} config={}",
        engine.program(),
        arch,
        store.path().display()
    );

    let options = PublishOptions {
        dockerfile,
        versions,
        assume_yes: yes,
    };

    let publisher = Publisher::new(&engine, &api, &prompter, arch);
    if let PublishOutcome::DockerfileMissing = publisher.run(&mut store, &options).await? {
        tracing::debug!("publish skipped: no Dockerfile");
    }

    Ok(())
}
