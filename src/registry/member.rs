// Tue Feb 3 2026 - Alex

use std::fmt;

/// The foundational aggregate kinds whose members the reflected graph cannot
/// describe about itself. Everything else is reconstructed from the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKind {
    /// The root object kind holding outer/name/kind-class bookkeeping.
    Container,
    /// The typed-field derivative describing data members.
    TypedField,
}

impl RootKind {
    pub fn ancestor(self) -> Option<RootKind> {
        match self {
            Self::Container => None,
            Self::TypedField => Some(Self::Container),
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            Self::Container => "Container",
            Self::TypedField => "TypedField",
        }
    }
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A registered member of a root kind. Mutated only at initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: String,
    /// Display type emitted verbatim into the declaration.
    pub type_label: String,
    pub offset: u32,
    pub size: u32,
}

impl MemberDescriptor {
    pub fn new(name: &str, type_label: &str, offset: u32, size: u32) -> Self {
        Self {
            name: name.to_string(),
            type_label: type_label.to_string(),
            offset,
            size,
        }
    }

    pub fn end_offset(&self) -> u32 {
        self.offset + self.size
    }
}

impl fmt::Display for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ 0x{:04X}(0x{:04X})",
            self.type_label, self.name, self.offset, self.size
        )
    }
}
