//! Tera rendering engine: [`DocumentKind`] enum and [`Renderer`].
//!
//! # Path mapping
//!
//! | Document      | Output path (repository-relative)   |
//! |---------------|-------------------------------------|
//! | Agent wrapper | `.claude/agents/<slug>.md`          |
//! | Skill         | `.agents/skills/<slug>/SKILL.md`    |

use std::path::PathBuf;

use tera::Tera;

use souls_core::layout;
use souls_core::sort_agents;
use souls_core::types::{Agent, AgentSlug};

use crate::context::DocumentContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("agent_wrapper.md", include_str!("templates/agent_wrapper.md.tera")),
    ("skill.md", include_str!("templates/skill.md.tera")),
];

fn build_tera() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    // Markdown output: never HTML-escape substituted values.
    tera.autoescape_on(vec![]);
    tera.add_raw_templates(TPLS.iter().copied())?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

/// The two documents generated for every agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    AgentWrapper,
    Skill,
}

impl DocumentKind {
    /// All document kinds in generation order.
    pub fn all() -> &'static [DocumentKind] {
        &[DocumentKind::AgentWrapper, DocumentKind::Skill]
    }

    /// Embedded template rendered for this kind.
    pub fn template_name(&self) -> &'static str {
        match self {
            DocumentKind::AgentWrapper => "agent_wrapper.md",
            DocumentKind::Skill => "skill.md",
        }
    }

    /// Output path for `slug`, relative to the repository root.
    pub fn output_rel(&self, slug: &AgentSlug) -> PathBuf {
        match self {
            DocumentKind::AgentWrapper => layout::agent_wrapper_rel(slug),
            DocumentKind::Skill => layout::skill_doc_rel(slug),
        }
    }

    /// Glob-style label used in summaries.
    pub fn pattern(&self) -> &'static str {
        match self {
            DocumentKind::AgentWrapper => ".claude/agents/*.md",
            DocumentKind::Skill => ".agents/skills/*/SKILL.md",
        }
    }
}

/// One rendered document and where it belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    pub slug: AgentSlug,
    /// Repository-relative output path.
    pub path: PathBuf,
    pub content: String,
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Tera-based renderer for both per-agent documents.
///
/// Uses embedded templates only. Create once with [`Renderer::new`] and reuse.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Construct a new [`Renderer`] with embedded templates.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer { tera: build_tera()? })
    }

    /// Render one document kind for `agent`.
    pub fn render_document(
        &self,
        agent: &Agent,
        schema_version: &str,
        kind: DocumentKind,
    ) -> Result<RenderedDocument, RenderError> {
        let ctx = DocumentContext::from_agent(agent, schema_version);
        self.render_with_context(&ctx, &agent.slug, kind)
    }

    /// Render a document from a caller-provided [`DocumentContext`].
    pub fn render_with_context(
        &self,
        ctx: &DocumentContext,
        slug: &AgentSlug,
        kind: DocumentKind,
    ) -> Result<RenderedDocument, RenderError> {
        let content = self.tera.render(kind.template_name(), &ctx.to_tera_context()?)?;
        Ok(RenderedDocument {
            kind,
            slug: slug.clone(),
            path: kind.output_rel(slug),
            content,
        })
    }

    /// Render every document kind for `agent`, in [`DocumentKind::all`] order.
    pub fn render(
        &self,
        agent: &Agent,
        schema_version: &str,
    ) -> Result<Vec<RenderedDocument>, RenderError> {
        let ctx = DocumentContext::from_agent(agent, schema_version);
        DocumentKind::all()
            .iter()
            .map(|kind| self.render_with_context(&ctx, &agent.slug, *kind))
            .collect()
    }

    /// Sort `agents` and render all of their documents.
    ///
    /// Output order is deterministic: sorted agent order, then document kind.
    pub fn render_all(
        &self,
        agents: &[Agent],
        schema_version: &str,
    ) -> Result<Vec<RenderedDocument>, RenderError> {
        let mut docs = Vec::with_capacity(agents.len() * DocumentKind::all().len());
        for agent in sort_agents(agents) {
            docs.extend(self.render(&agent, schema_version)?);
        }
        Ok(docs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
