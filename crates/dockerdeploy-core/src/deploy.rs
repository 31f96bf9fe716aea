//! `deploy`: run the last published image on dockerdeploy.cloud

use crate::error::Result;
use colored::Colorize;
use dockerdeploy_build::DEFAULT_APP_NAME;
use dockerdeploy_cloud::{
    CreateDeploymentModel, Deployment, DeploymentApi, DeploymentSize, dashboard_url,
};
use dockerdeploy_config::ConfigStore;
use serde::Serialize;
use std::collections::BTreeMap;

/// Display name of deployments created by the CLI
pub const DEPLOYMENT_NAME: &str = "dockerdeploy-app";

const PORT_MAPPING: &str = "80:80";
const PULL_POLICY: &str = "always";
const CPU_LIMIT: &str = "0.5";
const MEMORY_LIMIT: &str = "1G";

#[derive(Debug, Serialize)]
struct ComposeFile {
    services: BTreeMap<String, ComposeService>,
}

#[derive(Debug, Serialize)]
struct ComposeService {
    image: String,
    ports: Vec<String>,
    pull_policy: String,
    deploy: ComposeDeploy,
}

#[derive(Debug, Serialize)]
struct ComposeDeploy {
    resources: ComposeResources,
}

#[derive(Debug, Serialize)]
struct ComposeResources {
    limits: ResourceLimits,
}

#[derive(Debug, Serialize)]
struct ResourceLimits {
    cpus: String,
    memory: String,
}

/// Compose descriptor running `image` as a single service
pub fn deployment_descriptor(service_name: &str, image: &str) -> Result<String> {
    let service = ComposeService {
        image: image.to_string(),
        ports: vec![PORT_MAPPING.to_string()],
        pull_policy: PULL_POLICY.to_string(),
        deploy: ComposeDeploy {
            resources: ComposeResources {
                limits: ResourceLimits {
                    cpus: CPU_LIMIT.to_string(),
                    memory: MEMORY_LIMIT.to_string(),
                },
            },
        },
    };

    let compose = ComposeFile {
        services: BTreeMap::from([(service_name.to_string(), service)]),
    };

    Ok(serde_yaml::to_string(&compose)?)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Deployed(Deployment),
    /// Soft failure: nothing published yet, no API call was made
    NotPublished,
}

pub struct Deployer<'a> {
    api: &'a dyn DeploymentApi,
}

impl<'a> Deployer<'a> {
    pub fn new(api: &'a dyn DeploymentApi) -> Self {
        Self { api }
    }

    pub async fn run(&self, store: &ConfigStore) -> Result<DeployOutcome> {
        let config = store.config();

        let Some(tag_base) = config.tag_base.as_deref() else {
            println!(
                "{} No published image found. Run `dockerdeploy publish` first.",
                "⚠".yellow()
            );
            return Ok(DeployOutcome::NotPublished);
        };

        let service_name = config.image_name.as_deref().unwrap_or(DEFAULT_APP_NAME);
        let model = CreateDeploymentModel {
            name: DEPLOYMENT_NAME.to_string(),
            domain: String::new(),
            size: DeploymentSize::Xs,
            descriptor: deployment_descriptor(service_name, tag_base)?,
        };

        println!("{} {}", "Creating deployment for".blue(), tag_base.cyan());
        let deployment = self.api.create_deployment(&model).await?;

        println!("{}", "Starting deployment...".blue());
        self.api.deploy_deployment(&deployment.id).await?;

        println!();
        println!("{}", "✓ Deployment started!".green().bold());
        println!("  Dashboard: {}", dashboard_url(&deployment.id).cyan());
        println!("  Service:   {}", deployment.domain.cyan());

        Ok(DeployOutcome::Deployed(deployment))
    }
}
