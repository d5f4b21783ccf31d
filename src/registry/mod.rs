// Tue Feb 3 2026 - Alex

pub mod member;
pub mod registry;

pub use member::{MemberDescriptor, RootKind};
pub use registry::MemberRegistry;
