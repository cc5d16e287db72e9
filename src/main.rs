use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use healthcare_assistant::{
    assistant::Assistant,
    config::{Config, GenerationConfig, LogFormat},
    langbase::LangbaseClient,
    modes::Policy,
    repl::Repl,
};

/// Terminal healthcare-query assistant
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Initial response mode: rule, ai or hybrid (overrides DEFAULT_POLICY)
    #[arg(long)]
    policy: Option<Policy>,

    /// Call the generator on every query, even when a rule matches
    #[arg(long)]
    eager_generation: bool,
}

impl Cli {
    /// Apply flag overrides on top of the environment configuration
    fn apply(&self, generation: &mut GenerationConfig) {
        if let Some(policy) = self.policy {
            generation.default_policy = policy;
        }
        if self.eager_generation {
            generation.eager = true;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    cli.apply(&mut config.generation);

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Healthcare Assistant starting..."
    );

    let langbase = match LangbaseClient::new(&config.langbase, config.request.clone()) {
        Ok(c) => {
            info!(
                base_url = %config.langbase.base_url,
                pipe = %config.langbase.pipe,
                "Langbase client initialized"
            );
            c
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize Langbase client");
            return Err(e.into());
        }
    };

    let assistant = Assistant::from_config(&config, Arc::new(langbase));
    let mut repl = Repl::new(assistant, config.generation.default_policy);

    info!(
        policy = %config.generation.default_policy,
        eager = config.generation.eager,
        "Ready, reading from stdin"
    );

    if let Err(e) = repl.run().await {
        error!(error = %e, "Session error");
        return Err(e.into());
    }

    info!("Session closed");
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
