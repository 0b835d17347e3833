//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use manifold_core::config::platform::PlatformConfig;
use manifold_core::traits::ProgramLauncher;
use manifold_module::ModuleRunner;
use manifold_module::processors::register_builtin_processors;
use manifold_platform::register_builtin_platforms;
use manifold_plugin::context::ServiceContext;
use manifold_plugin::index::PluginIndex;
use manifold_plugin::instantiator::PluginInstantiator;

/// Scripted outcome for one candidate program.
#[derive(Debug, Clone, Copy)]
pub enum LaunchOutcome {
    /// The program launches and exits with this code.
    Exit(i32),
    /// The program fails to launch at all.
    LaunchError,
}

/// Launcher replaying scripted outcomes and recording every attempt.
#[derive(Debug)]
pub struct ScriptedLauncher {
    outcomes: Vec<(String, LaunchOutcome)>,
    attempts: Mutex<Vec<String>>,
}

impl ScriptedLauncher {
    /// Creates a launcher with per-program outcomes; unknown programs fail
    /// to launch.
    pub fn new(outcomes: &[(&str, LaunchOutcome)]) -> Self {
        Self {
            outcomes: outcomes
                .iter()
                .map(|(name, outcome)| (name.to_string(), *outcome))
                .collect(),
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// The programs attempted so far, in order.
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgramLauncher for ScriptedLauncher {
    async fn launch(&self, program: &str, _arg: &str) -> std::io::Result<i32> {
        self.attempts.lock().unwrap().push(program.to_string());
        match self
            .outcomes
            .iter()
            .find(|(name, _)| name == program)
            .map(|(_, outcome)| *outcome)
        {
            Some(LaunchOutcome::Exit(code)) => Ok(code),
            Some(LaunchOutcome::LaunchError) | None => {
                Err(std::io::Error::from(std::io::ErrorKind::NotFound))
            }
        }
    }
}

/// A fully wired runtime over a scripted launcher.
pub struct TestRuntime {
    /// The injection context.
    pub context: Arc<ServiceContext>,
    /// The plugin index with built-ins registered.
    pub index: Arc<PluginIndex>,
    /// Instantiator over the context.
    pub instantiator: Arc<PluginInstantiator>,
    /// Runner over the index.
    pub runner: ModuleRunner,
    /// The scripted launcher, for asserting on attempts.
    pub launcher: Arc<ScriptedLauncher>,
}

impl TestRuntime {
    /// Builds a runtime whose fallback platform probes `browsers` against
    /// the scripted `outcomes`.
    pub async fn new(browsers: &[&str], outcomes: &[(&str, LaunchOutcome)]) -> Self {
        let launcher = Arc::new(ScriptedLauncher::new(outcomes));

        let context = Arc::new(ServiceContext::new());
        context.register::<Arc<dyn ProgramLauncher>>(launcher.clone());

        let index = Arc::new(PluginIndex::new());
        register_builtin_processors(&index)
            .await
            .expect("Failed to register built-in processors");

        let platform_config = PlatformConfig {
            browsers: browsers.iter().map(|b| b.to_string()).collect(),
        };
        register_builtin_platforms(&index, &platform_config)
            .await
            .expect("Failed to register built-in platforms");

        let instantiator = Arc::new(PluginInstantiator::new(context.clone()));
        let runner = ModuleRunner::new(index.clone(), instantiator.clone());

        Self {
            context,
            index,
            instantiator,
            runner,
            launcher,
        }
    }
}
