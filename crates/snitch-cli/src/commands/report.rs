// SPDX-License-Identifier: Apache-2.0

//! The `report` command: send a test report through the configured backend.
//!
//! Builds a production-mode reporter and dispatches one error-level report,
//! exactly the way a host application would. Delivery is best-effort by
//! design; transport failures show up as local log lines, not exit codes.

use anyhow::{Context, Result};
use snitch_core::{
    AppConfig, AuxData, ErrorReport, GiteaBackend, GithubBackend, IssueBackend, LogValue,
    OpenRouterClient, Platform, Reporter,
};

use crate::cli::ReportArgs;

/// Runs the report command against the configured platform.
///
/// # Errors
///
/// Returns an error when the backend cannot be constructed (missing token or
/// host) or, for Gitea, when a label is not a numeric id.
pub async fn run(args: &ReportArgs, config: &AppConfig) -> Result<()> {
    match config.backend.platform {
        Platform::Github => {
            let backend = GithubBackend::new(config.backend.backend_config())?;
            send(backend, args, config, args.labels.clone()).await
        }
        Platform::Gitea => {
            let labels = args
                .labels
                .iter()
                .map(|label| {
                    label
                        .parse::<i64>()
                        .with_context(|| format!("Gitea labels are numeric ids, got: {label}"))
                })
                .collect::<Result<Vec<_>>>()?;
            let backend = GiteaBackend::new(config.backend.backend_config())?;
            send(backend, args, config, labels).await
        }
    }
}

async fn send<B: IssueBackend + 'static>(
    backend: B,
    args: &ReportArgs,
    config: &AppConfig,
    labels: Vec<B::Label>,
) -> Result<()> {
    let platform = backend.platform();

    let mut builder = Reporter::builder(backend).production(true);
    if config.ai.enabled || args.with_ai {
        builder = builder.ai(OpenRouterClient::new(&config.ai)?);
    }
    let reporter = builder.build();

    let payload = match &args.title {
        Some(title) => LogValue::Record {
            title: title.clone(),
            body: args.message.clone(),
        },
        None => LogValue::Text(args.message.clone()),
    };

    let mut data = AuxData::new();
    for (key, value) in &args.data {
        let parsed = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.clone()));
        data.insert(key.clone(), parsed);
    }

    reporter
        .error(ErrorReport::new(payload).with_data(data).with_labels(labels))
        .await;

    println!("Report dispatched to {platform} (best-effort; failures are logged locally).");
    Ok(())
}
