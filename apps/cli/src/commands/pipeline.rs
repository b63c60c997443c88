//! Pipeline command: the fixed four-stage sequential assessment.

use super::report::{maybe_save, print_report};
use colored::Colorize;
use riskcrew_orchestrator::Router;
use std::path::PathBuf;

/// Execute the pipeline command.
pub async fn execute(
    router: &Router,
    save: Option<Option<PathBuf>>,
    json_output: bool,
) -> anyhow::Result<()> {
    let output = router.run_fixed_pipeline_output().await?;
    let report = output.render();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report("Project Phoenix Risk Pipeline", &report);
        println!("{} {} stages completed", "✓".green(), output.texts().len());
    }
    maybe_save(&report, save)
}
