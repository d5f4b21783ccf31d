// Mon Feb 2 2026 - Alex

use crate::graph::object::ObjectId;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// 64-bit flag set attached to every property node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct PropertyFlags: u64 {
        const EDIT            = 1 << 0;
        const CONST_PARAM     = 1 << 1;
        const OPTIONAL_PARAM  = 1 << 4;
        const PARAM           = 1 << 7;
        const OUT_PARAM       = 1 << 8;
        const RETURN_PARAM    = 1 << 10;
        const REFERENCE_PARAM = 1 << 15;
        const TRANSIENT       = 1 << 21;
        const NATIVE          = 1 << 26;
    }
}

impl PropertyFlags {
    pub fn is_parameter(self) -> bool {
        self.contains(Self::PARAM)
    }

    pub fn is_return_value(self) -> bool {
        self.contains(Self::RETURN_PARAM)
    }

    pub fn is_out_parameter(self) -> bool {
        self.contains(Self::OUT_PARAM) && !self.contains(Self::RETURN_PARAM)
    }

    pub fn is_optional_parameter(self) -> bool {
        self.contains(Self::OPTIONAL_PARAM)
    }
}

bitflags! {
    /// Flag set attached to function nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct FunctionFlags: u32 {
        const FINAL  = 1 << 0;
        const IN_OP  = 1 << 4;
        const NATIVE = 1 << 10;
        const EVENT  = 1 << 11;
        /// No implicit receiver; dispatched without an instance.
        const STATIC = 1 << 13;
    }
}

impl FunctionFlags {
    pub fn is_static_dispatch(self) -> bool {
        self.contains(Self::STATIC)
    }

    pub fn describe(self) -> String {
        let mut parts = Vec::new();
        if self.contains(Self::FINAL) {
            parts.push("Final");
        }
        if self.contains(Self::IN_OP) {
            parts.push("Operator");
        }
        if self.contains(Self::NATIVE) {
            parts.push("Native");
        }
        if self.contains(Self::EVENT) {
            parts.push("Event");
        }
        if self.contains(Self::STATIC) {
            parts.push("Static");
        }
        if parts.is_empty() {
            parts.push("None");
        }
        parts.join(", ")
    }
}

/// Raw kind tag of a property node, with references into the graph for
/// composite kinds. Decoded by the snapshot producer from the property's
/// kind-class; the classifier maps it into the closed semantic kind set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawPropertyKind {
    Int8,
    Int16,
    Int32,
    Int64,
    /// Byte-wide; renders as the referenced enum when one is attached.
    Byte { enum_ref: Option<ObjectId> },
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
    /// Bit-packed; `byte_mask` selects the bit within the shared byte.
    Bool { byte_mask: u8 },
    /// Interned text handle.
    Name,
    /// Owned text buffer.
    Str,
    /// Bound delegate handle.
    Delegate,
    /// Nested aggregate by value.
    Struct { struct_ref: Option<ObjectId> },
    /// Reference to a graph object.
    Object { class_ref: Option<ObjectId> },
    /// Reference to a kind-class.
    Class { meta_class: Option<ObjectId> },
    /// One logical field physically backed by two slots.
    Interface { class_ref: Option<ObjectId> },
    /// Dynamic array; `inner` is a property node describing the element.
    Array { inner: Option<ObjectId> },
    /// Associative container; key/value are property nodes.
    Map {
        key: Option<ObjectId>,
        value: Option<ObjectId>,
    },
    Unknown { tag: String },
}

/// A reflected object known to describe a data member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProperty {
    pub raw_kind: RawPropertyKind,
    /// Element size as reported by the reflected model. Not authoritative
    /// for every kind; the classifier may compute a different correct size.
    pub element_size: u32,
    /// Fixed array dimension; 1 for scalar storage.
    pub array_dim: u32,
    pub flags: PropertyFlags,
    pub offset: u32,
}

impl RawProperty {
    pub fn new(raw_kind: RawPropertyKind, element_size: u32, offset: u32) -> Self {
        Self {
            raw_kind,
            element_size,
            array_dim: 1,
            flags: PropertyFlags::empty(),
            offset,
        }
    }

    pub fn with_array_dim(mut self, dim: u32) -> Self {
        self.array_dim = dim;
        self
    }

    pub fn with_flags(mut self, flags: PropertyFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_fixed_array(&self) -> bool {
        self.array_dim > 1
    }
}
