use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use client_core::HttpRegistrationClient;
use crossbeam_channel::{bounded, Receiver};
use form_controller::{
    AlertKind, ChannelFormHost, FormCommand, FormController, SubmissionOutcome, UiEvent,
};
use tracing::{info, warn};

mod config;

use config::load_settings;

/// Registers one user against the registration API without a GUI.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "register.toml")]
    config: PathBuf,
    /// Overrides the configured server URL.
    #[arg(long)]
    server_url: Option<String>,
    /// Print the assignable roles and exit.
    #[arg(long)]
    list_roles: bool,
    /// Field value as NAME=VALUE using the endpoint names, e.g.
    /// `Cedula_persona=1002003004` or `Rol_persona=3`.
    #[arg(long = "field", value_parser = parse_field_arg)]
    fields: Vec<(String, String)>,
}

fn parse_field_arg(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    Ok((name.trim().to_string(), value.to_string()))
}

fn drain_events(ui_rx: &Receiver<UiEvent>) {
    for event in ui_rx.try_iter() {
        match event {
            UiEvent::Alert(alert) => match alert.kind {
                AlertKind::Success => println!("[ok] {}", alert.text),
                AlertKind::Error => eprintln!("[error] {}", alert.text),
            },
            UiEvent::RegisterSucceeded => println!("user list should be refreshed"),
            UiEvent::CloseRequested => println!("registration dialog closed"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let base_url = settings.server_url()?;
    info!(server_url = %base_url, "using registration api");

    let api = HttpRegistrationClient::with_timeout(base_url, settings.request_timeout())
        .context("failed to build http client")?;
    let (ui_tx, ui_rx) = bounded(settings.event_queue_capacity.max(1));
    let controller = FormController::new(Arc::new(api), Arc::new(ChannelFormHost::new(ui_tx)));

    let roles = match controller.activate().await {
        Ok(roles) => roles,
        Err(err) => {
            warn!(error = %err, "continuing without roles");
            Vec::new()
        }
    };
    drain_events(&ui_rx);

    if args.list_roles {
        for role in &roles {
            println!("{}\t{}", role.id, role.display_name);
        }
        return Ok(());
    }

    controller.dispatch(FormCommand::Open).await?;
    for (name, value) in args.fields {
        let cmd = FormCommand::edit(&name, value)?;
        controller.dispatch(cmd).await?;
    }

    let outcome = controller
        .dispatch(FormCommand::Submit)
        .await?
        .ok_or_else(|| anyhow!("submit produced no outcome"))?;
    if let Some(message) = controller.error_message().await {
        eprintln!("{message}");
    }
    drain_events(&ui_rx);

    match outcome {
        SubmissionOutcome::Success(_) => Ok(()),
        other => bail!("registration failed: {other:?}"),
    }
}
