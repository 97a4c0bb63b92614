//! Souls core library: manifest types, loading, ordering, errors.
//!
//! - [`types`]: newtypes, v2 enums, and the typed [`Agent`]
//! - [`manifest`]: [`manifest::load_at`] and raw [`AgentRecord`]s
//! - [`sort`]: deterministic agent ordering
//! - [`frontmatter`]: flat `key: value` header reader
//! - [`layout`]: conventional repository paths and constant tables
//! - [`error`]: [`ManifestError`]

pub mod error;
pub mod frontmatter;
pub mod layout;
pub mod manifest;
pub mod sort;
pub mod types;

pub use error::ManifestError;
pub use manifest::{AgentRecord, Manifest};
pub use sort::sort_agents;
pub use types::{
    Agent, AgentPaths, AgentSlug, IsolationMode, MemoryScope, PermissionMode, RepoPath,
};
