//! Template context: serializable rendering payload built from an [`Agent`].
//!
//! Every conditional fragment (frontmatter lines, the delegation sentence) is
//! computed here so the templates themselves are plain substitutions.

use serde::Serialize;

use souls_core::frontmatter::capitalize;
use souls_core::types::{Agent, PermissionMode};

use crate::error::RenderError;

/// Flat rendering payload shared by both per-agent templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentContext {
    pub schema_version: String,
    /// Agent wrapper frontmatter body, one `key: value` per line, `\n`-terminated.
    pub frontmatter: String,
    pub name: String,
    pub role: String,
    pub description: String,
    pub domain: String,
    pub model: String,
    /// Capabilities joined with `", "`.
    pub capabilities: String,
    pub description_lower: String,
    /// Either empty or `" <Name> delegates to <A>, <B>."` (leading space).
    pub delegates_sentence: String,
    pub core_path: String,
    pub mistakes_path: String,
    pub cheatsheet_index_path: String,
}

impl DocumentContext {
    /// Build a [`DocumentContext`] for `agent` under `schema_version`.
    pub fn from_agent(agent: &Agent, schema_version: &str) -> Self {
        DocumentContext {
            schema_version: schema_version.to_string(),
            frontmatter: build_frontmatter(agent),
            name: agent.name.clone(),
            role: agent.role.clone(),
            description: agent.description.clone(),
            domain: agent.domain.clone(),
            model: agent.model.clone(),
            capabilities: agent.capabilities.join(", "),
            description_lower: lower_first_strip_period(&agent.description),
            delegates_sentence: delegates_sentence(agent),
            core_path: agent.paths.core.to_string(),
            mistakes_path: agent.paths.mistakes.to_string(),
            cheatsheet_index_path: agent.paths.cheatsheet_index.to_string(),
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

/// Frontmatter lines for the agent wrapper.
///
/// `name`, `model` and a quoted `description` are always present. The v2
/// fields follow in fixed order and only when they differ from their default:
/// `skills` (non-empty), `tools` (present, even if empty), `permissionMode`
/// (not `default`), `memory` and `isolation` (present).
pub fn build_frontmatter(agent: &Agent) -> String {
    let mut lines = vec![
        format!("name: {}", agent.slug),
        format!("model: {}", agent.model),
        format!("description: \"{}\"", agent.description),
    ];

    if !agent.skills.is_empty() {
        lines.push(format!("skills: {}", agent.skills.join(", ")));
    }
    if let Some(tools) = &agent.tools {
        lines.push(format!("tools: {}", tools.join(", ")));
    }
    if agent.permission_mode != PermissionMode::default() {
        lines.push(format!("permissionMode: {}", agent.permission_mode));
    }
    if let Some(memory) = agent.memory {
        lines.push(format!("memory: {memory}"));
    }
    if let Some(isolation) = agent.isolation {
        lines.push(format!("isolation: {isolation}"));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Lower-case the first character and strip any trailing periods, so the
/// description reads as a sentence fragment.
pub fn lower_first_strip_period(text: &str) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let lowered: String = first.to_lowercase().chain(chars).collect();
    lowered.trim_end_matches('.').to_string()
}

/// `" Nav delegates to Quant, Sage."`, or empty when there are no delegates.
pub fn delegates_sentence(agent: &Agent) -> String {
    if agent.delegates_to.is_empty() {
        return String::new();
    }
    let names: Vec<String> = agent.delegates_to.iter().map(|d| capitalize(&d.0)).collect();
    format!(" {} delegates to {}.", agent.name, names.join(", "))
}
