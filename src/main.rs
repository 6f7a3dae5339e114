mod config;
mod error;
mod render;
mod session;
mod ui;
mod form {
    pub mod answers;
    pub mod schema;
}
mod ai {
    pub mod builder;
    pub mod client;
    pub mod prompts;
}

use ai::client::OpenAiClient;
use config::Config;
use dotenv::dotenv;
use error::PlannerError;
use form::schema::FormSchema;
use session::Planner;
use ui::TerminalUi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Before the runtime starts: nothing else may touch the environment.
    config::clear_proxy_env();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    log::info!("🤖 Planner ready (model: {}, endpoint: {})", config.model, config.base_url);

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(run(&config))?;
    Ok(())
}

async fn run(config: &Config) -> Result<(), PlannerError> {
    let client = OpenAiClient::new(config)?;
    let planner = Planner::new(config, client, FormSchema::fitness_profile());
    TerminalUi::new().run(&planner).await
}
