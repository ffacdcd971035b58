mod backend;
mod commands;
mod config;
mod export;
mod logging;
mod output;

use crate::backend::http::HttpStore;
use crate::backend::memory::InMemoryStore;
use crate::backend::state::AppState;
use crate::backend::store::CollectionStore;
use crate::commands::{Command, Options};
use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "planact",
    about = "PlanAct: gerenciamento de colaboradores e atividades"
)]
struct Args {
    /// URL base da API (sobrepõe configuração e PLANACT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Arquivo de configuração TOML
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Usa dados de exemplo em memória, sem acessar a API
    #[arg(long, global = true)]
    demo: bool,

    /// Saída em JSON para painel e listagens
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn open_store(args: &Args, config: &Config) -> anyhow::Result<Box<dyn CollectionStore>> {
    if args.demo {
        info!("modo demonstração: dados em memória");
        return Ok(Box::new(InMemoryStore::with_sample_data()));
    }

    let store = HttpStore::new(&config.api_url, Duration::from_secs(config.timeout_secs))?;
    info!(api_url = store.base_url(), "usando API remota");
    Ok(Box::new(store))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    config.apply_env(|name| std::env::var(name).ok());
    if let Some(url) = &args.api_url {
        config.set_api_url(url);
    }

    logging::init(&config.log_level);

    let mut state = AppState::new(open_store(&args, &config)?);
    state.load()?;

    let options = Options {
        json: args.json,
        export_dir: config.export_dir.clone(),
    };
    commands::run(args.command, &mut state, &options)
}
