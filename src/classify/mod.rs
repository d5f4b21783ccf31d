// Tue Feb 3 2026 - Alex

pub mod classifier;
pub mod kind;

pub use classifier::{ClassifiedProperty, PropertyClassifier, RenderPosition};
pub use kind::PropertyKind;
