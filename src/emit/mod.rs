// Thu Feb 5 2026 - Alex

pub mod emitter;
pub mod functions;

pub use emitter::{DeclarationEmitter, PackageOutput};
