//! Agents command: list the registered crew.

use colored::Colorize;
use riskcrew_orchestrator::{AgentDefinition, AgentRegistry};
use serde_json::json;
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
struct AgentRow {
    #[tabled(rename = "ID")]
    id: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Delegates")]
    delegates: &'static str,
    #[tabled(rename = "Objective")]
    objective: String,
}

impl From<&AgentDefinition> for AgentRow {
    fn from(agent: &AgentDefinition) -> Self {
        Self {
            id: agent.role.as_str(),
            name: agent.role.display_name(),
            delegates: if agent.allow_delegation { "yes" } else { "no" },
            objective: agent.objective.clone(),
        }
    }
}

/// Execute the agents command.
pub fn execute(registry: &AgentRegistry, json_output: bool) -> anyhow::Result<()> {
    let agents = registry.list();

    if json_output {
        let agent_list: Vec<_> = agents
            .iter()
            .map(|agent| {
                json!({
                    "id": agent.role.as_str(),
                    "name": agent.role.display_name(),
                    "objective": agent.objective,
                    "allow_delegation": agent.allow_delegation,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&agent_list)?);
        return Ok(());
    }

    println!();
    println!("{}", format!("Found {} agents", agents.len()).bold().green());
    println!();
    let rows: Vec<AgentRow> = agents.into_iter().map(AgentRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}
