//! Analyze command: a custom risk analysis across the crew.

use super::report::{maybe_save, print_report};
use riskcrew_orchestrator::{Discipline, Router};
use std::path::PathBuf;

/// Execute the analyze command.
pub async fn execute(
    router: &Router,
    request: Option<&str>,
    discipline: Discipline,
    save: Option<Option<PathBuf>>,
    json_output: bool,
) -> anyhow::Result<()> {
    let output = router.run_analysis(request, discipline).await?;
    let rendered = output.render();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report("Risk Analysis Report", &rendered);
    }
    maybe_save(&rendered, save)
}
