use async_trait::async_trait;
use dockerdeploy_build::{CommandSpec, ContainerEngine, ProcessOutput, ProcessRunner};
use dockerdeploy_cloud::{
    CloudError, CreateDeploymentModel, Deployment, DeploymentApi, RegistryCredentials,
};
use dockerdeploy_config::{ConfigStore, DeploymentConfigUpdate};
use dockerdeploy_core::Prompter;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Records engine invocations and replays scripted results (success by default)
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<CommandSpec>>,
    responses: Mutex<VecDeque<std::io::Result<ProcessOutput>>>,
}

#[allow(dead_code)]
impl RecordingRunner {
    pub fn respond_ok(&self) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ProcessOutput::default()));
    }

    pub fn respond_failure(&self, stderr: &str) {
        self.responses.lock().unwrap().push_back(Ok(ProcessOutput {
            exit_code: 1,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }));
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls whose first argument is `subcommand`
    pub fn calls_to(&self, subcommand: &str) -> Vec<CommandSpec> {
        self.calls()
            .into_iter()
            .filter(|c| c.args.first().map(String::as_str) == Some(subcommand))
            .collect()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, command: &CommandSpec) -> std::io::Result<ProcessOutput> {
        self.calls.lock().unwrap().push(command.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ProcessOutput::default()))
    }
}

#[allow(dead_code)]
pub fn engine() -> (Arc<RecordingRunner>, ContainerEngine) {
    let runner = Arc::new(RecordingRunner::default());
    let engine = ContainerEngine::new(runner.clone());
    (runner, engine)
}

/// In-memory deployment API
pub struct FakeApi {
    pub username: String,
    pub deployment_id: String,
    pub domain: String,
    pub fail_create: bool,
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<CreateDeploymentModel>>,
}

#[allow(dead_code)]
impl FakeApi {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            deployment_id: "dep_123".to_string(),
            domain: "myapp-alice.dockerdeploy.app".to_string(),
            fail_create: false,
            calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<CreateDeploymentModel> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeploymentApi for FakeApi {
    async fn get_registry_credentials(&self) -> dockerdeploy_cloud::Result<RegistryCredentials> {
        self.calls.lock().unwrap().push("get_registry_credentials".to_string());
        Ok(RegistryCredentials {
            username: self.username.clone(),
            password: "registry-password".to_string(),
        })
    }

    async fn create_deployment(
        &self,
        model: &CreateDeploymentModel,
    ) -> dockerdeploy_cloud::Result<Deployment> {
        self.calls.lock().unwrap().push("create_deployment".to_string());
        if self.fail_create {
            return Err(CloudError::ApiError {
                status: 402,
                message: "payment required".to_string(),
            });
        }

        self.created.lock().unwrap().push(model.clone());
        Ok(Deployment {
            id: self.deployment_id.clone(),
            domain: self.domain.clone(),
            name: Some(model.name.clone()),
            status: None,
        })
    }

    async fn deploy_deployment(&self, deployment_id: &str) -> dockerdeploy_cloud::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("deploy_deployment:{}", deployment_id));
        Ok(())
    }
}

/// Prompter with canned answers
pub struct ScriptedPrompter {
    confirm_answer: bool,
    answers: Mutex<VecDeque<String>>,
    pub confirms: Mutex<usize>,
    pub errors: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedPrompter {
    pub fn new(confirm_answer: bool, answers: &[&str]) -> Self {
        Self {
            confirm_answer,
            answers: Mutex::new(answers.iter().map(|s| s.to_string()).collect()),
            confirms: Mutex::new(0),
            errors: Mutex::new(Vec::new()),
        }
    }

    /// Declines every confirmation and has no answers to give
    pub fn silent() -> Self {
        Self::new(false, &[])
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, _message: &str, _default: bool) -> std::io::Result<bool> {
        *self.confirms.lock().unwrap() += 1;
        Ok(self.confirm_answer)
    }

    fn input(&self, _message: &str) -> std::io::Result<String> {
        self.answers.lock().unwrap().pop_front().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })
    }

    fn show_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Temporary project directory with a Dockerfile and a config file path
pub struct TestProject {
    pub root: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("Dockerfile"), "FROM alpine\n").unwrap();
        Self { root }
    }

    pub fn dockerfile(&self) -> PathBuf {
        self.root.path().join("Dockerfile")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("config").join("config.json")
    }

    pub fn store(&self) -> ConfigStore {
        ConfigStore::load(self.config_path()).unwrap()
    }

    pub fn store_with_image_name(&self, name: &str) -> ConfigStore {
        let mut store = self.store();
        store
            .update(DeploymentConfigUpdate::image_name(name))
            .unwrap();
        store
    }
}
