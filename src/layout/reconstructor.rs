// Wed Feb 4 2026 - Alex

use crate::classify::{ClassifiedProperty, PropertyKind};
use crate::config::GeneratorConfig;
use crate::context::GenerationContext;
use crate::layout::plan::{LayoutEntry, LayoutPlan, PaddingKind};
use crate::names::NameScope;

/// Turns an ordered set of classified members plus an authoritative total
/// size into a gap-free LayoutPlan, inferring the padding and size fix-ups
/// the source metadata does not state.
pub struct LayoutReconstructor {
    min_alignment: u32,
    padding_stride: Option<u32>,
}

impl LayoutReconstructor {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            min_alignment: config.min_alignment,
            padding_stride: config.padding_stride,
        }
    }

    pub fn reconstruct(
        &self,
        scope: NameScope,
        start_offset: u32,
        authoritative_size: u32,
        mut properties: Vec<ClassifiedProperty>,
        ctx: &mut GenerationContext,
    ) -> LayoutPlan {
        // Properties aliasing one offset are bit-packed booleans sharing a
        // byte; they emit in ascending mask order. Everything else keeps its
        // original order on ties (stable sort).
        properties.sort_by(|a, b| {
            a.offset
                .cmp(&b.offset)
                .then(a.bit_mask.unwrap_or(0).cmp(&b.bit_mask.unwrap_or(0)))
        });

        let mut entries: Vec<LayoutEntry> = Vec::with_capacity(properties.len());
        let mut cursor = start_offset;
        let mut unknown_index: u32 = 0;

        for prop in properties {
            if prop.offset > cursor {
                let gap = prop.offset - cursor;
                if gap >= self.min_alignment {
                    entries.push(self.padding_entry(
                        scope,
                        PaddingKind::MissedOffset,
                        cursor,
                        gap,
                        &mut unknown_index,
                        ctx,
                    ));
                }
                cursor = prop.offset;
            }

            if !prop.is_valid() {
                // Never dropped: dropping would shift every later member.
                let span = prop.occupied_span();
                let name = ctx.names.resolve(scope, &prop.name);
                entries.push(
                    LayoutEntry::member(name, "unsigned char".to_string(), prop.offset, span, 1)
                        .with_unknown_property(),
                );
                ctx.diag.unknown_properties += 1;
                cursor = cursor.max(prop.offset + span);
                continue;
            }

            if prop.kind == PropertyKind::InterfaceRef {
                self.push_interface_pair(scope, &prop, &mut entries, ctx);
                cursor = cursor.max(prop.offset + prop.occupied_span());
                continue;
            }

            let name = ctx.names.resolve(scope, &prop.name);
            let mut entry = LayoutEntry::member(
                name,
                prop.display_type.clone(),
                prop.offset,
                prop.size,
                prop.array_dim,
            );
            if let Some(mask) = prop.bit_mask {
                entry = entry.with_bit_mask(mask);
            }
            let end = entry.end_offset();
            entries.push(entry);
            cursor = cursor.max(end);

            let correction = prop.span_correction();
            if correction > 0 {
                entries.push(self.padding_entry(
                    scope,
                    PaddingKind::FixWrongSize,
                    cursor,
                    correction,
                    &mut unknown_index,
                    ctx,
                ));
                cursor += correction;
            }
        }

        let overflowed = cursor > authoritative_size;
        if authoritative_size > cursor {
            let gap = authoritative_size - cursor;
            // Small trailing gaps are silent slop, not reported.
            if gap >= self.min_alignment {
                entries.push(self.padding_entry(
                    scope,
                    PaddingKind::DynamicFieldPadding,
                    cursor,
                    gap,
                    &mut unknown_index,
                    ctx,
                ));
                cursor = authoritative_size;
            }
        }

        let mut stride_padded = false;
        if let Some(stride) = self.padding_stride {
            let effective = cursor.max(authoritative_size);
            let remainder = (effective - start_offset) % stride;
            if remainder != 0 {
                let fill = stride - remainder;
                entries.push(self.padding_entry(
                    scope,
                    PaddingKind::AddedPadding,
                    effective,
                    fill,
                    &mut unknown_index,
                    ctx,
                ));
                cursor = effective + fill;
                stride_padded = true;
                ctx.diag.added_padding_events += 1;
                ctx.diag.log_line(&format!(
                    "added 0x{:X} byte(s) of stride padding at 0x{:04X}",
                    fill, effective
                ));
            }
        }

        LayoutPlan {
            start_offset,
            authoritative_size,
            entries,
            final_cursor: cursor,
            stride_padded,
            overflowed,
        }
    }

    fn padding_entry(
        &self,
        scope: NameScope,
        kind: PaddingKind,
        offset: u32,
        size: u32,
        unknown_index: &mut u32,
        ctx: &mut GenerationContext,
    ) -> LayoutEntry {
        let name = ctx
            .names
            .resolve(scope, &format!("UnknownData{:02X}", *unknown_index));
        *unknown_index += 1;
        LayoutEntry::padding(name, kind, offset, size)
    }

    /// The reflected model reports an interface reference as one field that
    /// is physically two slots; emit both under one logical name.
    fn push_interface_pair(
        &self,
        scope: NameScope,
        prop: &ClassifiedProperty,
        entries: &mut Vec<LayoutEntry>,
        ctx: &mut GenerationContext,
    ) {
        let secondary_size = prop.element_size.saturating_sub(prop.size).max(1);
        let object_name = ctx.names.resolve(scope, &format!("{}_Object", prop.name));
        let interface_name = ctx.names.resolve(scope, &format!("{}_Interface", prop.name));
        entries.push(LayoutEntry::member(
            object_name,
            prop.display_type.clone(),
            prop.offset,
            prop.size,
            1,
        ));
        entries.push(LayoutEntry::member(
            interface_name,
            "void*".to_string(),
            prop.offset + prop.size,
            secondary_size,
            1,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Diagnostics;
    use crate::graph::{ObjectId, PropertyFlags};

    fn context() -> GenerationContext {
        GenerationContext::new(GeneratorConfig::default(), Diagnostics::disabled())
    }

    fn scope() -> NameScope {
        NameScope::Type(ObjectId(99))
    }

    fn member(name: &str, kind: PropertyKind, size: u32, element_size: u32, offset: u32) -> ClassifiedProperty {
        ClassifiedProperty {
            name: name.to_string(),
            kind,
            size,
            element_size,
            array_dim: 1,
            offset,
            bit_mask: None,
            flags: PropertyFlags::empty(),
            display_type: "int32_t".to_string(),
            const_ref_eligible: false,
            referents: Vec::new(),
        }
    }

    fn reconstructor() -> LayoutReconstructor {
        LayoutReconstructor::from_config(&GeneratorConfig::default())
    }

    #[test]
    fn test_single_member_padded_both_sides() {
        // Size 0x10, one member at 0x4 of size 0x4: leading padding,
        // member, trailing padding.
        let mut ctx = context();
        let plan = reconstructor().reconstruct(
            scope(),
            0,
            0x10,
            vec![member("Value", PropertyKind::Int32, 4, 4, 0x4)],
            &mut ctx,
        );

        assert_eq!(plan.entries.len(), 3);
        assert_eq!(plan.entries[0].offset, 0x0);
        assert_eq!(plan.entries[0].span(), 0x4);
        assert_eq!(plan.entries[0].padding, Some(PaddingKind::MissedOffset));
        assert_eq!(plan.entries[1].offset, 0x4);
        assert_eq!(plan.entries[1].span(), 0x4);
        assert!(plan.entries[1].padding.is_none());
        assert_eq!(plan.entries[2].offset, 0x8);
        assert_eq!(plan.entries[2].span(), 0x8);
        assert_eq!(plan.entries[2].padding, Some(PaddingKind::DynamicFieldPadding));
        assert_eq!(plan.final_cursor, 0x10);
        assert!(plan.verify_coverage(4));
    }

    #[test]
    fn test_bools_ordered_by_mask() {
        let mut low = member("bSecond", PropertyKind::Bool, 1, 1, 0x8);
        low.bit_mask = Some(0x2);
        low.display_type = "unsigned char".to_string();
        let mut first = member("bFirst", PropertyKind::Bool, 1, 1, 0x8);
        first.bit_mask = Some(0x1);
        first.display_type = "unsigned char".to_string();

        let mut ctx = context();
        // Deliberately passed mask-descending.
        let plan = reconstructor().reconstruct(scope(), 0x8, 0x9, vec![low, first], &mut ctx);

        let members: Vec<(&str, Option<u8>)> = plan
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.bit_mask))
            .collect();
        assert_eq!(members, vec![("bFirst", Some(0x1)), ("bSecond", Some(0x2))]);
        assert!(plan.entries[0].annotation().contains("BitMask: 0x01"));
        assert!(plan.entries[1].annotation().contains("BitMask: 0x02"));
        assert_eq!(plan.final_cursor, 0x9);
    }

    #[test]
    fn test_interface_pair_without_fixup() {
        // Reflected element 0xC, correct primary slot 0x8: the remaining
        // 0x4 is the secondary slot, not a size error.
        let mut prop = member("Target", PropertyKind::InterfaceRef, 8, 0xC, 0x0);
        prop.display_type = "class Damageable*".to_string();

        let mut ctx = context();
        let plan = reconstructor().reconstruct(scope(), 0, 0xC, vec![prop], &mut ctx);

        assert_eq!(plan.entries.len(), 2);
        assert_eq!(plan.entries[0].name, "Target_Object");
        assert_eq!(plan.entries[0].span(), 0x8);
        assert_eq!(plan.entries[1].name, "Target_Interface");
        assert_eq!(plan.entries[1].offset, 0x8);
        assert_eq!(plan.entries[1].span(), 0x4);
        assert!(plan.padding_entries().next().is_none());
        assert_eq!(plan.final_cursor, 0xC);
    }

    #[test]
    fn test_wrong_size_gets_fixup_padding() {
        // Correct size 8, reflected 0x10: trailing fix-up of 0x8.
        let prop = member("Tag", PropertyKind::TextHandle, 8, 0x10, 0x0);
        let mut ctx = context();
        let plan = reconstructor().reconstruct(scope(), 0, 0x10, vec![prop], &mut ctx);

        assert_eq!(plan.entries.len(), 2);
        assert_eq!(plan.entries[1].padding, Some(PaddingKind::FixWrongSize));
        assert_eq!(plan.entries[1].offset, 0x8);
        assert_eq!(plan.entries[1].span(), 0x8);
        assert_eq!(plan.final_cursor, 0x10);
    }

    #[test]
    fn test_unknown_property_retained_not_dropped() {
        let mystery = member("Mystery", PropertyKind::Unknown, 0x8, 0x8, 0x0);
        let after = member("After", PropertyKind::Int32, 4, 4, 0x8);
        let mut ctx = context();
        let plan = reconstructor().reconstruct(scope(), 0, 0xC, vec![mystery, after], &mut ctx);

        assert_eq!(plan.entries.len(), 2);
        assert!(plan.entries[0].unknown_property);
        assert!(plan.entries[0].annotation().contains("UNKNOWN PROPERTY"));
        assert_eq!(plan.entries[1].offset, 0x8);
        assert_eq!(ctx.diag.unknown_properties, 1);
    }

    #[test]
    fn test_sub_granularity_tail_is_silent_slop() {
        let prop = member("Value", PropertyKind::Int32, 4, 4, 0x0);
        let mut ctx = context();
        let plan = reconstructor().reconstruct(scope(), 0, 0x6, vec![prop], &mut ctx);

        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.final_cursor, 0x4);
        assert!(plan.verify_coverage(4));
    }

    #[test]
    fn test_stride_rounding_adds_tagged_padding() {
        let config = GeneratorConfig::default().with_padding_stride(0x10);
        let prop = member("Value", PropertyKind::Int64, 8, 8, 0x0);
        let mut ctx = context();
        let plan = LayoutReconstructor::from_config(&config)
            .reconstruct(scope(), 0, 0x8, vec![prop], &mut ctx);

        assert!(plan.stride_padded);
        let last = plan.entries.last().unwrap();
        assert_eq!(last.padding, Some(PaddingKind::AddedPadding));
        assert_eq!(last.offset, 0x8);
        assert_eq!(last.span(), 0x8);
        assert_eq!(plan.final_cursor, 0x10);
        assert_eq!(ctx.diag.added_padding_events, 1);
    }

    #[test]
    fn test_array_dimension_multiplies_span() {
        let mut table = member("Table", PropertyKind::Int32, 4, 4, 0x0);
        table.array_dim = 4;
        let next = member("Next", PropertyKind::Int32, 4, 4, 0x10);
        let mut ctx = context();
        let plan = reconstructor().reconstruct(scope(), 0, 0x14, vec![table, next], &mut ctx);

        assert_eq!(plan.entries.len(), 2);
        assert_eq!(plan.entries[0].span(), 0x10);
        assert_eq!(plan.entries[1].offset, 0x10);
        assert!(plan.verify_coverage(4));
    }

    #[test]
    fn test_inherited_start_offset() {
        // Members of a derived aggregate start at the ancestor's end.
        let prop = member("Extra", PropertyKind::Int32, 4, 4, 0x30);
        let mut ctx = context();
        let plan = reconstructor().reconstruct(scope(), 0x28, 0x38, vec![prop], &mut ctx);

        assert_eq!(plan.entries[0].offset, 0x28);
        assert_eq!(plan.entries[0].span(), 0x8);
        assert_eq!(plan.entries[0].padding, Some(PaddingKind::MissedOffset));
        assert_eq!(plan.entries[2].offset, 0x34);
        assert_eq!(plan.entries[2].padding, Some(PaddingKind::DynamicFieldPadding));
        assert_eq!(plan.final_cursor, 0x38);
    }

    #[test]
    fn test_overflow_is_flagged_not_silent() {
        let prop = member("Big", PropertyKind::Int64, 8, 8, 0x0);
        let mut ctx = context();
        let plan = reconstructor().reconstruct(scope(), 0, 0x4, vec![prop], &mut ctx);
        assert!(plan.overflowed);
    }
}
