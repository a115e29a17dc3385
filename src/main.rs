//! Disruption discovery pipeline entrypoint.

use tracing::info;

use undercut::config::Config;
use undercut::pipeline;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let stage = std::env::args().nth(1).unwrap_or_else(|| "run".to_string());

    let config = Config::from_env()?;
    config.validate()?;

    info!(
        data_dir = %config.data_dir.display(),
        stage = %stage,
        "Undercut starting"
    );

    match stage.as_str() {
        "inject" => {
            let report = pipeline::run_injection(&config)?;
            info!(
                merged = report.merged_len(),
                replaced = report.replaced,
                appended = report.appended,
                rejected = report.rejected.len(),
                "Injection stage complete"
            );
        }
        "embed" => {
            let report = pipeline::run_embedding(&config)?;
            info!(
                embedded = report.embedded,
                reused = report.reused,
                skipped_empty = report.skipped_empty.len(),
                "Embedding stage complete"
            );
        }
        "score" => {
            let summary = pipeline::run_scoring(&config)?;
            info!(
                anchors = summary.anchors,
                with_disruptors = summary.anchors_with_disruptors,
                rows = summary.result_rows,
                results = %config.results_path().display(),
                "Scoring stage complete"
            );
        }
        "run" => {
            let summary = pipeline::run_all(&config)?;
            info!(
                merged = summary.injection.merged_len(),
                stored_vectors = summary.embedding.stored(),
                anchors = summary.scoring.anchors,
                with_disruptors = summary.scoring.anchors_with_disruptors,
                "Pipeline complete"
            );
        }
        other => anyhow::bail!("unknown stage: {other} (expected inject | embed | score | run)"),
    }

    Ok(())
}
