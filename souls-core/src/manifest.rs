//! Manifest loading.
//!
//! [`load_at`] only checks the envelope (`schema_version` + `agents` array).
//! Agents stay as raw JSON objects ([`AgentRecord`]) until a caller asks for a
//! typed [`Agent`], so that the validator can report every missing field of
//! every agent instead of stopping at the first one.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{io_err, ManifestError};
use crate::types::Agent;

/// Fields every agent record must carry.
pub const REQUIRED_MANIFEST_FIELDS: &[&str] = &["name", "slug", "domain", "role", "description", "model"];

/// Keys every agent's `paths` object must carry.
pub const REQUIRED_PATH_FIELDS: &[&str] = &[
    "core",
    "cheatsheets",
    "cheatsheet_index",
    "memory",
    "mistakes",
    "session_log",
    "decisions",
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One agent entry exactly as it appears in the manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRecord(pub Map<String, Value>);

impl AgentRecord {
    /// Raw field lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Best available label for messages: slug, else name, else `UNKNOWN`.
    pub fn label(&self) -> String {
        ["slug", "name"]
            .iter()
            .find_map(|k| self.0.get(*k).and_then(Value::as_str))
            .unwrap_or("UNKNOWN")
            .to_string()
    }

    /// Every required field absent from this record, top-level fields first,
    /// then path fields as `paths.<key>`.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing: Vec<String> = REQUIRED_MANIFEST_FIELDS
            .iter()
            .filter(|f| !self.0.contains_key(**f))
            .map(|f| f.to_string())
            .collect();

        let paths = self.0.get("paths").and_then(Value::as_object);
        for field in REQUIRED_PATH_FIELDS {
            if !paths.is_some_and(|p| p.contains_key(*field)) {
                missing.push(format!("paths.{field}"));
            }
        }
        missing
    }

    /// Decode into a typed [`Agent`].
    ///
    /// Reports the first missing required field as
    /// [`ManifestError::FieldMissing`]; any other decoding failure is
    /// [`ManifestError::InvalidAgent`].
    pub fn to_agent(&self) -> Result<Agent, ManifestError> {
        if let Some(field) = self.missing_fields().into_iter().next() {
            return Err(ManifestError::FieldMissing {
                owner: format!("agent '{}'", self.label()),
                field,
            });
        }
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|source| {
            ManifestError::InvalidAgent {
                slug: self.label(),
                source,
            }
        })
    }
}

/// The parsed manifest: schema version plus raw agent records in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub schema_version: String,
    pub records: Vec<AgentRecord>,
}

impl Manifest {
    /// `true` when the schema declares the v2 optional fields.
    pub fn is_v2(&self) -> bool {
        self.schema_version.starts_with('2')
    }

    /// Decode every record, failing on the first bad record or duplicate slug.
    pub fn agents(&self) -> Result<Vec<Agent>, ManifestError> {
        let mut seen = BTreeSet::new();
        let mut agents = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let agent = record.to_agent()?;
            if !seen.insert(agent.slug.clone()) {
                return Err(ManifestError::DuplicateSlug {
                    slug: agent.slug.0,
                });
            }
            agents.push(agent);
        }
        Ok(agents)
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load the manifest at `path`.
///
/// Returns [`ManifestError::NotFound`] if absent, [`ManifestError::Encoding`]
/// for non-UTF-8 bytes, [`ManifestError::Parse`] (with line context) for bad
/// JSON, and [`ManifestError::FieldMissing`] / [`ManifestError::Malformed`]
/// when the envelope is incomplete.
pub fn load_at(path: &Path) -> Result<Manifest, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
    let text = String::from_utf8(bytes).map_err(|source| ManifestError::Encoding {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text).map_err(|e| match e {
        ParseFailure::Json(source) => ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Shape(err) => err,
    })
}

enum ParseFailure {
    Json(serde_json::Error),
    Shape(ManifestError),
}

fn parse(text: &str) -> Result<Manifest, ParseFailure> {
    let value: Value = serde_json::from_str(text).map_err(ParseFailure::Json)?;
    let Value::Object(mut root) = value else {
        return Err(ParseFailure::Shape(ManifestError::Malformed {
            message: "top level must be a JSON object".to_string(),
        }));
    };

    let schema_version = match root.remove("schema_version") {
        Some(Value::String(s)) => s,
        Some(other) => {
            return Err(ParseFailure::Shape(ManifestError::Malformed {
                message: format!("'schema_version' must be a string, got {other}"),
            }))
        }
        None => return Err(ParseFailure::Shape(missing_envelope_field("schema_version"))),
    };

    let agents = match root.remove("agents") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ParseFailure::Shape(ManifestError::Malformed {
                message: "'agents' must be an array".to_string(),
            }))
        }
        None => return Err(ParseFailure::Shape(missing_envelope_field("agents"))),
    };

    let mut records = Vec::with_capacity(agents.len());
    for (index, item) in agents.into_iter().enumerate() {
        match item {
            Value::Object(map) => records.push(AgentRecord(map)),
            _ => {
                return Err(ParseFailure::Shape(ManifestError::Malformed {
                    message: format!("agents[{index}] must be an object"),
                }))
            }
        }
    }

    Ok(Manifest {
        schema_version,
        records,
    })
}

fn missing_envelope_field(field: &str) -> ManifestError {
    ManifestError::FieldMissing {
        owner: "manifest".to_string(),
        field: field.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
