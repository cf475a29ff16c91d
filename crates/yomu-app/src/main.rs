use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use yomu_config::Config;
use yomu_config::log::LogConfig;

mod controller;
mod events;
mod io;
mod output;
mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Headless pop-up dictionary: reads commands on stdin, prints matches as
/// JSON lines on stdout.
#[derive(Parser, Debug)]
#[command(name = "yomu")]
#[command(about = "Japanese pop-up dictionary lookup engine")]
struct Args {
    /// JSON config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// JMdict JSON file; repeat to merge several, later ones win
    #[arg(long = "dictionary", short = 'd')]
    dictionaries: Vec<String>,

    /// Deinflection rule table replacing the built-in one
    #[arg(long)]
    rules: Option<String>,

    /// Priority list of `[text, reading, score]` triples
    #[arg(long)]
    priority: Option<String>,

    /// Log as JSON lines on stderr
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if !self.dictionaries.is_empty() {
            config.dictionary.paths = self.dictionaries;
        }
        if let Some(rules) = self.rules {
            config.dictionary.rules_path = Some(rules);
        }
        if let Some(priority) = self.priority {
            config.dictionary.priority_path = Some(priority);
        }
        if self.json_logs {
            config.log.json = true;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    args.apply(&mut config);

    init_tracing(&config.log);
    tracing::info!("Starting yomu");

    let channel_capacity = config.channel_capacity;
    let state = Arc::new(AppState::new(config)?);
    let controller = AppController::new(state, channel_capacity);
    let mut tasks = controller.spawn_tasks(tokio::io::stdin(), tokio::io::stdout());

    // Tasks stop on their own once a shutdown event has been processed
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                controller.shutdown();
            }
            next = tasks.join_next() => match next {
                None => break,
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => {
                    tracing::error!("Task failed: {e:#}");
                    controller.shutdown();
                }
                Some(Err(e)) => {
                    tracing::error!("Task panicked: {e}");
                    controller.shutdown();
                }
            },
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries results.
fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_new(&log.filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = log.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text = (!log.json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}
