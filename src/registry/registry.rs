// Tue Feb 3 2026 - Alex

use crate::config::{AncestorFieldLocation, GeneratorConfig};
use crate::registry::member::{MemberDescriptor, RootKind};
use std::collections::HashMap;

/// Catalog of the members of the root aggregate kinds, registered at
/// initialization and read-only during generation.
#[derive(Default)]
pub struct MemberRegistry {
    members: HashMap<RootKind, Vec<MemberDescriptor>>,
}

impl MemberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in layouts of both root kinds,
    /// placing the ancestor-field member where the configuration says the
    /// target game keeps it.
    pub fn with_defaults(config: &GeneratorConfig) -> Self {
        let mut registry = Self::new();

        registry.register(RootKind::Container, MemberDescriptor::new("VfTable", "void*", 0x00, 8));
        registry.register(
            RootKind::Container,
            MemberDescriptor::new("ObjectFlags", "uint32_t", 0x08, 4),
        );
        registry.register(
            RootKind::Container,
            MemberDescriptor::new("InternalIndex", "int32_t", 0x0C, 4),
        );
        registry.register(
            RootKind::Container,
            MemberDescriptor::new("KindClass", "class Container*", 0x10, 8),
        );
        registry.register(
            RootKind::Container,
            MemberDescriptor::new("NameHandle", "struct NameHandle", 0x18, 8),
        );
        registry.register(
            RootKind::Container,
            MemberDescriptor::new("Outer", "class Container*", 0x20, 8),
        );

        let mut cursor = 0x28;
        if config.ancestor_field_location == AncestorFieldLocation::Container {
            registry.register(
                RootKind::Container,
                MemberDescriptor::new("AncestorField", "class Container*", cursor, 8),
            );
            cursor += 8;
        }

        registry.register(
            RootKind::TypedField,
            MemberDescriptor::new("NextField", "class TypedField*", cursor, 8),
        );
        cursor += 8;
        if config.ancestor_field_location == AncestorFieldLocation::TypedField {
            registry.register(
                RootKind::TypedField,
                MemberDescriptor::new("AncestorField", "class TypedField*", cursor, 8),
            );
            cursor += 8;
        }
        registry.register(
            RootKind::TypedField,
            MemberDescriptor::new("ElementSize", "int32_t", cursor, 4),
        );
        registry.register(
            RootKind::TypedField,
            MemberDescriptor::new("ArrayDim", "int32_t", cursor + 4, 4),
        );
        registry.register(
            RootKind::TypedField,
            MemberDescriptor::new("PropertyFlags", "uint64_t", cursor + 8, 8),
        );
        registry.register(
            RootKind::TypedField,
            MemberDescriptor::new("ByteOffset", "int32_t", cursor + 16, 4),
        );

        registry
    }

    /// Idempotent: re-registering a member name for the same kind overwrites
    /// the previous descriptor.
    pub fn register(&mut self, kind: RootKind, descriptor: MemberDescriptor) {
        let members = self.members.entry(kind).or_default();
        if let Some(existing) = members.iter_mut().find(|m| m.name == descriptor.name) {
            *existing = descriptor;
        } else {
            members.push(descriptor);
        }
        members.sort_by_key(|m| m.offset);
    }

    /// Members of the kind itself (not its ancestors), ordered by offset.
    /// Empty when nothing was registered; callers must treat that as the
    /// unregistered-kind error, not a crash.
    pub fn members_of(&self, kind: RootKind) -> &[MemberDescriptor] {
        self.members.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_members(&self, kind: RootKind) -> bool {
        !self.members_of(kind).is_empty()
    }

    /// Where "new" members of this kind begin: the cumulative registered
    /// span of the ancestor chain.
    pub fn base_offset_of(&self, kind: RootKind) -> u32 {
        match kind.ancestor() {
            Some(ancestor) => self.registered_size_of(ancestor),
            None => 0,
        }
    }

    /// End offset of the last registered member, ancestors included.
    pub fn registered_size_of(&self, kind: RootKind) -> u32 {
        let own = self
            .members_of(kind)
            .iter()
            .map(MemberDescriptor::end_offset)
            .max()
            .unwrap_or(0);
        own.max(self.base_offset_of(kind))
    }
}
