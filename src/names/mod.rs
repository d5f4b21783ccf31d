// Tue Feb 3 2026 - Alex

pub mod resolver;

pub use resolver::{sanitize_identifier, NameRegistry, NameScope, FALLBACK_NAME};
