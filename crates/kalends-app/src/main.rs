mod cli;

use std::sync::Arc;

use clap::Parser;
use kalends_core::config::load_config;
use kalends_service::auth::{
    AccessFilter, AllowAll, Authorizer, CasbinAccessFilter, init_casbin_from_file,
};
use kalends_service::{CalendarService, CalendarSettings};
use kalends_store::MemoryStore;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let settings = CalendarSettings::from_config(&config.calendar)?;

    let fixture = cli
        .fixture
        .clone()
        .or_else(|| config.store.fixture.clone().map(Into::into));
    let store = if let Some(path) = fixture {
        MemoryStore::from_fixture_file(settings.timezone, path)?
    } else {
        tracing::warn!("No store fixture configured, the store is empty");
        MemoryStore::new(settings.timezone)
    };

    let access: Box<dyn AccessFilter> = if let Some(path) = &config.access.policy_file {
        let enforcer = init_casbin_from_file(path).await?;
        Box::new(CasbinAccessFilter::new(Authorizer::new(Arc::new(enforcer))))
    } else {
        tracing::info!("No access policy configured, every definition is visible");
        Box::new(AllowAll)
    };

    let identity = cli.identity(config.access.default_user.as_deref());
    tracing::info!(identity = %identity, documents = store.len(), "Running command");

    let service = CalendarService::new(store, access, settings);
    let output = cli.command.run(&service, &identity)?;

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
