//! Domain types for the agent manifest.
//!
//! Path fields are kept as repository-relative strings ([`RepoPath`]) rather
//! than `PathBuf`: a trailing `/` marks a directory reference and must survive
//! untouched into rendered documents.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Unique machine-readable identifier for an agent, used in generated paths.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentSlug(pub String);

impl fmt::Display for AgentSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for AgentSlug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AgentSlug {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A repository-relative path string as written in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoPath(pub String);

impl RepoPath {
    /// `true` when the manifest refers to a directory (trailing separator).
    pub fn is_dir_ref(&self) -> bool {
        self.0.ends_with('/')
    }

    /// Join onto the repository root.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RepoPath {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RepoPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// Enums (schema v2)
// ---------------------------------------------------------------------------

/// Permission mode granted to an agent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PermissionMode {
    #[default]
    Default,
    Plan,
    BypassPermissions,
    AcceptEdits,
}

impl PermissionMode {
    pub const ALL: &'static [PermissionMode] = &[
        PermissionMode::Default,
        PermissionMode::Plan,
        PermissionMode::BypassPermissions,
        PermissionMode::AcceptEdits,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionMode::Default => "default",
            PermissionMode::Plan => "plan",
            PermissionMode::BypassPermissions => "bypassPermissions",
            PermissionMode::AcceptEdits => "acceptEdits",
        }
    }
}

/// Persistence scope for an agent's memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryScope {
    User,
    Project,
    Local,
}

impl MemoryScope {
    pub const ALL: &'static [MemoryScope] =
        &[MemoryScope::User, MemoryScope::Project, MemoryScope::Local];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryScope::User => "user",
            MemoryScope::Project => "project",
            MemoryScope::Local => "local",
        }
    }
}

/// Workspace isolation for an agent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsolationMode {
    Worktree,
}

impl IsolationMode {
    pub const ALL: &'static [IsolationMode] = &[IsolationMode::Worktree];

    pub fn as_str(&self) -> &'static str {
        match self {
            IsolationMode::Worktree => "worktree",
        }
    }
}

macro_rules! str_enum_impls {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        let expected: Vec<&str> = $ty::ALL.iter().map(|v| v.as_str()).collect();
                        format!(
                            "invalid {} '{}'; expected: {}",
                            $what,
                            s,
                            expected.join(", ")
                        )
                    })
            }
        }
    };
}

str_enum_impls!(PermissionMode, "permissionMode");
str_enum_impls!(MemoryScope, "memory scope");
str_enum_impls!(IsolationMode, "isolation mode");

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// Named file and directory locations belonging to one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentPaths {
    /// Core identity document.
    pub core: RepoPath,
    pub cheatsheets: RepoPath,
    pub cheatsheet_index: RepoPath,
    pub memory: RepoPath,
    pub mistakes: RepoPath,
    pub session_log: RepoPath,
    pub decisions: RepoPath,
}

impl AgentPaths {
    /// `(key, path)` pairs in manifest key order.
    pub fn entries(&self) -> [(&'static str, &RepoPath); 7] {
        [
            ("core", &self.core),
            ("cheatsheets", &self.cheatsheets),
            ("cheatsheet_index", &self.cheatsheet_index),
            ("memory", &self.memory),
            ("mistakes", &self.mistakes),
            ("session_log", &self.session_log),
            ("decisions", &self.decisions),
        ]
    }
}

/// One agent profile from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Display name.
    pub name: String,
    pub slug: AgentSlug,
    pub domain: String,
    pub role: String,
    pub description: String,
    /// Model tier.
    pub model: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub delegates_to: Vec<AgentSlug>,
    pub paths: AgentPaths,

    #[serde(default)]
    pub skills: Vec<String>,
    /// `None` means unrestricted; `Some(vec![])` is an explicit empty allow-list.
    #[serde(default)]
    pub tools: Option<Vec<String>>,
    #[serde(default, rename = "permissionMode")]
    pub permission_mode: PermissionMode,
    #[serde(default)]
    pub memory: Option<MemoryScope>,
    #[serde(default)]
    pub isolation: Option<IsolationMode>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
