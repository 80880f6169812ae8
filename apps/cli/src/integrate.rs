//! `conduit integrate`

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use conduit_core::Payload;
use conduit_sync::{ConnectorIntegrator, IntegratorConfig};

pub async fn run(config_path: Option<PathBuf>, demo: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => IntegratorConfig::load(Some(path.clone()))
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => IntegratorConfig::load_or_default(None),
    };

    let mut integrator = ConnectorIntegrator::builder().from_config(&config).build();

    println!("Testing platform connections...");
    let results = integrator.test_all_connections().await;
    for (id, connected) in &results {
        let name = integrator
            .registry()
            .get(id)
            .map(|c| c.display_name.as_str())
            .unwrap_or(id.as_str());
        let mark = if *connected { "✓" } else { "✗" };
        let status = if *connected { "Connected" } else { "Failed" };
        println!("{} {}: {}", mark, name, status);
    }

    if demo {
        integrator
            .create_sync_task("notion", "github", payload("motion_template", "123"))
            .context("Failed to queue demo task")?;
        integrator
            .create_sync_task("linear", "email", payload("issue_update", "FIR-12"))
            .context("Failed to queue demo task")?;
    }

    let summary = integrator.process_sync_queue().await;
    info!(
        completed = summary.completed,
        failed = summary.failed,
        "Sync queue processed"
    );

    let report = integrator.generate_report();
    println!("\nIntegration Report:");
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to render report")?
    );

    Ok(())
}

fn payload(kind: &str, id: &str) -> Payload {
    let mut payload = Payload::new();
    payload.insert("type".into(), json!(kind));
    payload.insert("id".into(), json!(id));
    payload
}
