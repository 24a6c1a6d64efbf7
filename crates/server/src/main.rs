// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

#[cfg(not(target_os = "windows"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use config::{Args, RegistryConfig};
use server::{app, logging, metrics, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let config = load_config(&args)?;

    logging::init_with_config((&config.log).into())?;
    if config.metrics.enabled {
        metrics::init(&config.metrics.prometheus_prefix);
    }

    let bind = format!("{}:{}", config.express.bind_host, config.express.port);
    tracing::info!("Starting server on {}", bind);
    tracing::info!("Log level: {}", config.log.level);
    tracing::info!("Explorer URL: {}", config.explorer.url);
    if config.metrics.enabled {
        tracing::info!("Prometheus metrics at /metrics");
    }

    let state = AppState::new(config)?;
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn load_config(args: &Args) -> Result<RegistryConfig, config::ConfigError> {
    RegistryConfig::from_env_file(&args.env_file)
}
