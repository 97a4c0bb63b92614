//! # souls-renderer
//!
//! Tera-based template engine that renders the two per-agent documents
//! (agent wrapper and skill) from manifest data.
//!
//! Rendering is a pure function of `(agent, schema_version)`: no timestamps,
//! host names, or other ambient values reach the output, so on-disk copies
//! can be checked for drift by plain content equality.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use souls_renderer::Renderer;
//! use souls_core::Agent;
//!
//! fn render_all(agents: &[Agent]) {
//!     if let Ok(renderer) = Renderer::new() {
//!         if let Ok(docs) = renderer.render_all(agents, "2.0") {
//!             for doc in docs {
//!                 println!("{}: {} bytes", doc.path.display(), doc.content.len());
//!             }
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::DocumentContext;
pub use engine::{DocumentKind, RenderedDocument, Renderer};
pub use error::RenderError;
