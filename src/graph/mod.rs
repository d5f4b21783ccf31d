// Mon Feb 2 2026 - Alex

pub mod graph;
pub mod object;
pub mod property;

pub use graph::{DerivedNames, GraphSnapshot, ObjectGraph};
pub use object::{ObjectId, ObjectKind, ReflectedObject};
pub use property::{FunctionFlags, PropertyFlags, RawProperty, RawPropertyKind};
