// Mon Feb 2 2026 - Alex
//
// reflection-sdkgen reconstructs compilable C++ declarations from a reflected
// object graph: exact member offsets, explicit padding, deduplicated names
// and callable function signatures.

pub mod cache;
pub mod classify;
pub mod config;
pub mod context;
pub mod diag;
pub mod emit;
pub mod error;
pub mod generator;
pub mod graph;
pub mod layout;
pub mod memory;
pub mod names;
pub mod output;
pub mod registry;

pub use config::{AncestorFieldLocation, GeneratorConfig};
pub use context::GenerationContext;
pub use diag::Diagnostics;
pub use error::GeneratorError;
pub use generator::{Generator, RunSummary};
pub use graph::{GraphSnapshot, ObjectGraph, ObjectId, ObjectKind};

pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
