//! Ask command: route one question to the responsible agent.

use colored::Colorize;
use riskcrew_orchestrator::Router;
use serde_json::json;

/// Execute the ask command.
pub async fn execute(router: &Router, query: &str, json_output: bool) -> anyhow::Result<()> {
    let route = router.classify(query);
    let answer = router.ask(query).await?;

    if json_output {
        let out = json!({
            "query": query,
            "route": route,
            "answer": answer,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{} {}", "→".cyan(), format!("Routed to {route}").dimmed());
        println!();
        println!("{}", answer.trim_end());
    }
    Ok(())
}
