//! Manifold — extension runtime demo and inspection CLI.
//!
//! Wires the runtime together: configuration, logging, the service context,
//! the plugin index with built-in processors and platform handlers, and a
//! few commands for poking at it.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{EnvFilter, fmt};

use manifold_core::config::RuntimeConfig;
use manifold_core::error::RuntimeError;
use manifold_core::traits::ProgramLauncher;
use manifold_core::types::{ItemKind, Module, ModuleItem, ModuleSpec};
use manifold_module::processors::register_builtin_processors;
use manifold_module::{FnBody, ModuleRunner};
use manifold_platform::{SystemLauncher, register_builtin_platforms, select_platform};
use manifold_plugin::context::ServiceContext;
use manifold_plugin::descriptor::Capability;
use manifold_plugin::index::PluginIndex;
use manifold_plugin::instantiator::PluginInstantiator;

#[derive(Parser)]
#[command(name = "manifold", about = "Manifold extension runtime", version)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config/default.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the registered plugins per capability.
    Plugins,
    /// Open a URL with the platform handler selected for this environment.
    Open {
        /// The URL to open.
        url: String,
    },
    /// Run a sample module through the processing pipeline.
    Demo {
        /// Value for the module's required "name" input; leave unset to see
        /// the input check cancel the run.
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(cli, config).await {
        tracing::error!("Runtime error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration(path: &str) -> Result<RuntimeConfig, RuntimeError> {
    let config_path = std::env::var("MANIFOLD_CONFIG").unwrap_or_else(|_| path.to_string());
    RuntimeConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &RuntimeConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Build the runtime and execute the requested command
async fn run(cli: Cli, config: RuntimeConfig) -> Result<(), RuntimeError> {
    tracing::info!("Starting Manifold v{}", env!("CARGO_PKG_VERSION"));

    let context = Arc::new(ServiceContext::new());
    context.register::<Arc<dyn ProgramLauncher>>(Arc::new(SystemLauncher::new()));

    let index = Arc::new(PluginIndex::new());
    if config.pipeline.builtin_processors {
        register_builtin_processors(&index).await?;
    }
    register_builtin_platforms(&index, &config.platform).await?;

    let instantiator = Arc::new(PluginInstantiator::new(context));

    match cli.command {
        Command::Plugins => {
            for capability in Capability::all() {
                println!("{}:", capability);
                for descriptor in index.plugins(capability).await {
                    println!(
                        "  {:<16} priority={:<10} enabled={} applicable={}",
                        descriptor.name,
                        descriptor.priority.to_string(),
                        descriptor.enabled,
                        descriptor.applies_to_current_environment()
                    );
                }
            }
        }
        Command::Open { url } => {
            let platform = select_platform(&index, &instantiator).await?;
            tracing::info!(platform = platform.name(), url = %url, "Opening URL");
            platform.open(&url).await?;
        }
        Command::Demo { name } => {
            let spec = Arc::new(
                ModuleSpec::new("greeting")
                    .with_input(
                        ModuleItem::required("name", ItemKind::Text)
                            .with_description("Who to greet"),
                    )
                    .with_input(
                        ModuleItem::optional("punctuation", ItemKind::Text)
                            .with_default(json!("!")),
                    )
                    .with_output(ModuleItem::optional("message", ItemKind::Text)),
            );

            let mut module = Module::new(spec);
            if let Some(name) = name {
                module.set_input("name", json!(name))?;
            }

            let body = FnBody::new(|module: &mut Module| {
                Box::pin(async move {
                    let name = module
                        .input("name")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string();
                    let punctuation = module
                        .input("punctuation")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string();
                    module.set_output("message", json!(format!("Hello, {name}{punctuation}")))
                })
            });

            let runner = ModuleRunner::new(index.clone(), instantiator.clone());
            let report = runner.run(&mut module, &body).await?;

            println!("status: {:?}", report.status);
            if let Some(reason) = &report.cancel_reason {
                println!("canceled: {}", reason);
            }
            if let Some(message) = module.output("message") {
                println!("message: {}", message);
            }
        }
    }

    Ok(())
}
