// Wed Feb 4 2026 - Alex

pub mod plan;
pub mod reconstructor;

pub use plan::{LayoutEntry, LayoutPlan, PaddingKind};
pub use reconstructor::LayoutReconstructor;
