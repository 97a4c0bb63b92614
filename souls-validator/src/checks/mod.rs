//! The ten repository checks, in the order they run.

pub mod drift;
pub mod frontmatter;
pub mod index;
pub mod manifest;
pub mod paths;
pub mod utf8;
pub mod v2;

/// Check names, in run order.
pub const ALL: &[&str] = &[
    manifest::NAME,
    paths::PATH_RESOLUTION,
    frontmatter::CORE,
    frontmatter::CHEATSHEET,
    index::NAME,
    utf8::NAME,
    drift::NAME,
    paths::MEMORY_STRUCTURE,
    frontmatter::SKILLS,
    v2::NAME,
];
