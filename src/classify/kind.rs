// Tue Feb 3 2026 - Alex

use std::fmt;

/// Pointer width of the reconstructed ABI.
pub const POINTER_SIZE: u32 = 8;
/// Runtime representation size of an interned text handle.
pub const TEXT_HANDLE_SIZE: u32 = 8;
/// Runtime representation size of an owned text buffer.
pub const TEXT_BUFFER_SIZE: u32 = 16;
/// Runtime representation size of a bound delegate handle.
pub const DELEGATE_HANDLE_SIZE: u32 = 16;

/// The closed set of semantic property kinds. Every raw reflected property
/// descriptor maps into exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
    /// Bit-packed; shares its storage byte with other booleans.
    Bool,
    TextHandle,
    TextBuffer,
    DelegateHandle,
    /// Nested aggregate by value.
    Struct,
    ObjectRef,
    ClassRef,
    /// One logical field backed by two physical slots.
    InterfaceRef,
    /// Dynamic array container.
    Array,
    /// Associative container.
    Map,
    Unknown,
}

impl PropertyKind {
    /// Fixed platform width for scalar kinds; `None` for kinds whose size
    /// comes from the reflected model or a runtime representation constant.
    pub fn fixed_size(self) -> Option<u32> {
        match self {
            Self::Int8 | Self::UInt8 | Self::Bool => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float => Some(4),
            Self::Int64 | Self::UInt64 | Self::Double => Some(8),
            Self::TextHandle => Some(TEXT_HANDLE_SIZE),
            Self::TextBuffer => Some(TEXT_BUFFER_SIZE),
            Self::DelegateHandle => Some(DELEGATE_HANDLE_SIZE),
            Self::ObjectRef | Self::ClassRef | Self::InterfaceRef => Some(POINTER_SIZE),
            Self::Struct | Self::Array | Self::Map | Self::Unknown => None,
        }
    }

    pub fn is_reference(self) -> bool {
        matches!(self, Self::ObjectRef | Self::ClassRef | Self::InterfaceRef)
    }

    pub fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Map)
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
