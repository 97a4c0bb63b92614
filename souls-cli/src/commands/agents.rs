//! `souls agents`: list manifest agents in generation order.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use souls_core::{layout, manifest, sort_agents};

/// Arguments for `souls agents`.
#[derive(Args, Debug)]
pub struct AgentsArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct AgentRow {
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "slug")]
    slug: String,
    #[tabled(rename = "domain")]
    domain: String,
    #[tabled(rename = "role")]
    role: String,
    #[tabled(rename = "model")]
    model: String,
}

impl AgentsArgs {
    pub fn run(self, root: &Path) -> Result<ExitCode> {
        let manifest = manifest::load_at(&layout::manifest_path(root))
            .context("failed to load agents/manifest.json")?;
        let agents = sort_agents(&manifest.agents().context("manifest has invalid agents")?);

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&agents).context("failed to serialize agents JSON")?
            );
            return Ok(ExitCode::SUCCESS);
        }

        println!("{} agents | schema {}", agents.len(), manifest.schema_version);
        if agents.is_empty() {
            return Ok(ExitCode::SUCCESS);
        }
        let rows: Vec<AgentRow> = agents
            .into_iter()
            .map(|a| AgentRow {
                name: a.name,
                slug: a.slug.0,
                domain: a.domain,
                role: a.role,
                model: a.model,
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(ExitCode::SUCCESS)
    }
}
