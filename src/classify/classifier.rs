// Tue Feb 3 2026 - Alex

use crate::classify::kind::{PropertyKind, POINTER_SIZE};
use crate::context::GenerationContext;
use crate::graph::{ObjectGraph, ObjectId, PropertyFlags, RawPropertyKind, ReflectedObject};
use crate::names::FALLBACK_NAME;

/// Where the rendered type will appear. Booleans are bit-packed in storage
/// but honest `bool` in call signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPosition {
    StorageField,
    Parameter,
    ReturnValue,
}

/// A raw property descriptor after classification: semantic kind, correct
/// storage size, display type and parameter qualifiers.
#[derive(Debug, Clone)]
pub struct ClassifiedProperty {
    pub name: String,
    pub kind: PropertyKind,
    /// Correct storage size of one element, as computed for the kind. May
    /// disagree with `element_size`; the layout pass reconciles them.
    pub size: u32,
    /// Element size reported by the reflected model.
    pub element_size: u32,
    pub array_dim: u32,
    pub offset: u32,
    pub bit_mask: Option<u8>,
    pub flags: PropertyFlags,
    pub display_type: String,
    pub const_ref_eligible: bool,
    /// Referenced aggregates for kinds that need a dependency walk. A map
    /// can carry two (key and value); all of them must be declared first.
    pub referents: Vec<ObjectId>,
}

impl ClassifiedProperty {
    /// A property is valid iff its kind resolved and its storage size is
    /// non-zero. Invalid ones are retained as unknown placeholders.
    pub fn is_valid(&self) -> bool {
        self.kind != PropertyKind::Unknown && self.size > 0
    }

    /// Bytes this property occupies in the aggregate, array dimension and
    /// the interface secondary slot included.
    pub fn occupied_span(&self) -> u32 {
        let dim = self.array_dim.max(1);
        if self.kind == PropertyKind::InterfaceRef {
            self.element_size.max(self.size) * dim
        } else {
            self.size * dim
        }
    }

    /// Bytes the reflected model claims beyond the correct span; reconciled
    /// by a fix-up padding entry.
    pub fn span_correction(&self) -> u32 {
        if self.kind == PropertyKind::InterfaceRef {
            return 0;
        }
        let dim = self.array_dim.max(1);
        (self.element_size * dim).saturating_sub(self.size * dim)
    }

    fn unknown(name: &str, element_size: u32, array_dim: u32, offset: u32, flags: PropertyFlags) -> Self {
        Self {
            name: name.to_string(),
            kind: PropertyKind::Unknown,
            size: element_size,
            element_size,
            array_dim,
            offset,
            bit_mask: None,
            flags,
            display_type: "unsigned char".to_string(),
            const_ref_eligible: false,
            referents: Vec::new(),
        }
    }
}

/// Maps raw reflected property descriptors into the closed semantic kind
/// set, computing storage size, display type and qualifier eligibility.
pub struct PropertyClassifier<'a> {
    graph: &'a ObjectGraph,
}

impl<'a> PropertyClassifier<'a> {
    pub fn new(graph: &'a ObjectGraph) -> Self {
        Self { graph }
    }

    pub fn classify(
        &self,
        node: &ReflectedObject,
        position: RenderPosition,
        ctx: &mut GenerationContext,
    ) -> ClassifiedProperty {
        let raw = match &node.property {
            Some(raw) => raw,
            None => return ClassifiedProperty::unknown(&node.name, 0, 1, 0, PropertyFlags::empty()),
        };

        let mut classified = self.classify_raw(node, raw, position, ctx);

        // Return values and outputs copy through; fixed arrays and
        // bit-packed booleans cannot be passed by const reference.
        classified.const_ref_eligible = !(raw.flags.is_return_value()
            || raw.flags.is_out_parameter()
            || raw.array_dim > 1
            || classified.kind == PropertyKind::Bool);

        classified
    }

    pub fn classify_by_id(
        &self,
        id: ObjectId,
        position: RenderPosition,
        ctx: &mut GenerationContext,
    ) -> ClassifiedProperty {
        self.classify(self.graph.node(id), position, ctx)
    }

    fn classify_raw(
        &self,
        node: &ReflectedObject,
        raw: &crate::graph::RawProperty,
        position: RenderPosition,
        ctx: &mut GenerationContext,
    ) -> ClassifiedProperty {
        let make = |kind: PropertyKind, size: u32, display: String, referents: Vec<ObjectId>, mask: Option<u8>| {
            ClassifiedProperty {
                name: node.name.clone(),
                kind,
                size,
                element_size: raw.element_size,
                array_dim: raw.array_dim.max(1),
                offset: raw.offset,
                bit_mask: mask,
                flags: raw.flags,
                display_type: display,
                const_ref_eligible: false,
                referents,
            }
        };
        let unknown = || {
            ClassifiedProperty::unknown(
                &node.name,
                raw.element_size,
                raw.array_dim.max(1),
                raw.offset,
                raw.flags,
            )
        };

        match &raw.raw_kind {
            RawPropertyKind::Int8 => make(PropertyKind::Int8, 1, "int8_t".into(), Vec::new(), None),
            RawPropertyKind::Int16 => make(PropertyKind::Int16, 2, "int16_t".into(), Vec::new(), None),
            RawPropertyKind::Int32 => make(PropertyKind::Int32, 4, "int32_t".into(), Vec::new(), None),
            RawPropertyKind::Int64 => make(PropertyKind::Int64, 8, "int64_t".into(), Vec::new(), None),
            RawPropertyKind::UInt16 => make(PropertyKind::UInt16, 2, "uint16_t".into(), Vec::new(), None),
            RawPropertyKind::UInt32 => make(PropertyKind::UInt32, 4, "uint32_t".into(), Vec::new(), None),
            RawPropertyKind::UInt64 => make(PropertyKind::UInt64, 8, "uint64_t".into(), Vec::new(), None),
            RawPropertyKind::Float => make(PropertyKind::Float, 4, "float".into(), Vec::new(), None),
            RawPropertyKind::Double => make(PropertyKind::Double, 8, "double".into(), Vec::new(), None),
            RawPropertyKind::Byte { enum_ref } => {
                let display = self.enum_display(*enum_ref, ctx);
                make(PropertyKind::UInt8, 1, display, Vec::new(), None)
            }
            RawPropertyKind::Bool { byte_mask } => {
                let display = match position {
                    RenderPosition::Parameter | RenderPosition::ReturnValue => "bool",
                    RenderPosition::StorageField => "unsigned char",
                };
                make(PropertyKind::Bool, 1, display.into(), Vec::new(), Some(*byte_mask))
            }
            RawPropertyKind::Name => make(
                PropertyKind::TextHandle,
                crate::classify::kind::TEXT_HANDLE_SIZE,
                "struct NameHandle".into(),
                Vec::new(),
                None,
            ),
            RawPropertyKind::Str => make(
                PropertyKind::TextBuffer,
                crate::classify::kind::TEXT_BUFFER_SIZE,
                "struct TextBuffer".into(),
                Vec::new(),
                None,
            ),
            RawPropertyKind::Delegate => make(
                PropertyKind::DelegateHandle,
                crate::classify::kind::DELEGATE_HANDLE_SIZE,
                "struct DelegateHandle".into(),
                Vec::new(),
                None,
            ),
            RawPropertyKind::Struct { struct_ref } => match struct_ref {
                // Aggregate-typed kinds use the reflected element size
                // verbatim.
                Some(referent) => {
                    let display = format!("struct {}", ctx.type_name(self.graph, *referent));
                    make(PropertyKind::Struct, raw.element_size, display, vec![*referent], None)
                }
                None => unknown(),
            },
            RawPropertyKind::Object { class_ref } => {
                let display = format!("class {}*", self.referent_name(*class_ref, ctx));
                make(PropertyKind::ObjectRef, POINTER_SIZE, display, Vec::new(), None)
            }
            RawPropertyKind::Class { meta_class } => {
                let display = format!("class {}*", self.referent_name(*meta_class, ctx));
                make(PropertyKind::ClassRef, POINTER_SIZE, display, Vec::new(), None)
            }
            RawPropertyKind::Interface { class_ref } => {
                let display = format!("class {}*", self.referent_name(*class_ref, ctx));
                make(PropertyKind::InterfaceRef, POINTER_SIZE, display, Vec::new(), None)
            }
            RawPropertyKind::Array { inner } => match inner {
                Some(inner_id) => {
                    let inner_prop = self.classify_by_id(*inner_id, RenderPosition::StorageField, ctx);
                    if !inner_prop.is_valid() {
                        return unknown();
                    }
                    let display = format!("TArray<{}>", inner_prop.display_type);
                    make(PropertyKind::Array, raw.element_size, display, inner_prop.referents, None)
                }
                None => unknown(),
            },
            RawPropertyKind::Map { key, value } => match (key, value) {
                (Some(key_id), Some(value_id)) => {
                    let key_prop = self.classify_by_id(*key_id, RenderPosition::StorageField, ctx);
                    let value_prop = self.classify_by_id(*value_id, RenderPosition::StorageField, ctx);
                    if !key_prop.is_valid() || !value_prop.is_valid() {
                        return unknown();
                    }
                    let display = format!("TMap<{}, {}>", key_prop.display_type, value_prop.display_type);
                    let mut referents = key_prop.referents;
                    referents.extend(value_prop.referents);
                    make(PropertyKind::Map, raw.element_size, display, referents, None)
                }
                _ => unknown(),
            },
            RawPropertyKind::Unknown { .. } => unknown(),
        }
    }

    /// Enum-backed bytes render as the enum when its name resolves to a
    /// non-empty legal identifier, otherwise as the raw integer width.
    fn enum_display(&self, enum_ref: Option<ObjectId>, ctx: &mut GenerationContext) -> String {
        match enum_ref {
            Some(id) => {
                let name = ctx.type_name(self.graph, id);
                if name.is_empty() || name == FALLBACK_NAME {
                    "uint8_t".to_string()
                } else {
                    name
                }
            }
            None => "uint8_t".to_string(),
        }
    }

    fn referent_name(&self, referent: Option<ObjectId>, ctx: &mut GenerationContext) -> String {
        match referent {
            Some(id) => ctx.type_name(self.graph, id),
            None => "Container".to_string(),
        }
    }
}
