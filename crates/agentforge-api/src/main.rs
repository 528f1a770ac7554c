//! AgentForge CLI and REST API entry point.
//!
//! Binary name: `agentforge`
//!
//! Parses CLI arguments, loads configuration, installs tracing, opens the
//! database and services, then dispatches to a command handler or starts
//! the REST API server.

mod cli;
mod http;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use clap_complete::generate;

use agentforge_infra::config::{apply_env_overrides, load_config, resolve_data_dir};
use agentforge_observe::{LogHandle, TracingOptions, init_tracing, resolve_filter, shutdown_tracing};

use cli::{Cli, Commands, ConfigAction, UserAction};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config or state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "agentforge", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let config = apply_env_overrides(load_config(&data_dir).await);

    let rust_log = std::env::var("RUST_LOG").ok();
    let explicit_filter =
        rust_log.as_deref().is_some_and(|d| !d.trim().is_empty()) || cli.verbose > 0 || cli.quiet;
    let log = init_tracing(&TracingOptions {
        filter: resolve_filter(rust_log, cli.verbose, cli.quiet, &config.log.level),
        json: config.log.json,
        otel: config.log.otel,
    })?;

    if let Commands::Config {
        action: ConfigAction::Show,
    } = &cli.command
    {
        cli::config::show_config(&config, &data_dir, cli.json)?;
        return Ok(());
    }

    let port_override = match &cli.command {
        Commands::Serve { port, .. } => *port,
        _ => None,
    };
    let state = AppState::init(data_dir, config, Arc::new(log.clone()), port_override).await?;

    if !explicit_filter {
        apply_stored_log_level(&state, &log).await;
    }

    let result = run(cli, state).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli, state: AppState) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { host, .. } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let addr = format!("{host}:{}", state.server_port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            if !cli.quiet {
                println!(
                    "  {} AgentForge API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, "server started");

            let router = http::router::build_router(state);
            axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown_signal())
            .await?;
            tracing::info!("server stopped");
        }

        Commands::User { action } => match action {
            UserAction::Create {
                email,
                password,
                admin,
            } => {
                cli::user::create_user(&state, &email, password, admin, cli.json).await?;
            }
            UserAction::List => cli::user::list_users(&state, cli.json).await?,
            UserAction::Promote { email } => {
                cli::user::promote_user(&state, &email, cli.json).await?;
            }
        },

        Commands::Config { .. } | Commands::Completions { .. } => {}
    }
    Ok(())
}

/// Apply a log level saved from the admin panel when no flag or `RUST_LOG`
/// chose one.
async fn apply_stored_log_level(state: &AppState, log: &LogHandle) {
    let stored = match state.admin.get().await {
        Ok(view) => view.settings.log_level,
        Err(e) => {
            tracing::warn!(error = %e, "could not read admin settings");
            return;
        }
    };
    if let Some(level) = stored {
        if let Err(e) = log.set_filter(&level) {
            tracing::warn!(level = %level, error = %e, "ignoring stored log level");
        }
    }
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
