// Thu Feb 5 2026 - Alex

use crate::cache::{ObjectCache, PackageBucket};
use crate::classify::{ClassifiedProperty, PropertyClassifier, RenderPosition};
use crate::context::GenerationContext;
use crate::graph::{ObjectGraph, ObjectId, ObjectKind};
use crate::layout::{LayoutEntry, LayoutReconstructor, PaddingKind};
use crate::names::{sanitize_identifier, NameScope};
use crate::registry::{MemberRegistry, RootKind};
use std::fmt::Write as _;

/// The four logical outputs produced for one container-scoped bucket.
#[derive(Debug, Clone)]
pub struct PackageOutput {
    pub package: ObjectId,
    pub name: String,
    /// (a) nested-aggregate declarations, dependency-ordered.
    pub structs: String,
    /// (b) constant, enumeration and class declarations.
    pub classes: String,
    /// (c) function parameter blocks.
    pub parameters: String,
    /// (d) function bodies with reconstructed call signatures.
    pub functions: String,
}

struct EmitBuffers {
    structs: String,
    classes: String,
    parameters: String,
    functions: String,
}

/// Drives the layout reconstructor, classifier and name resolver to emit
/// textual declarations for every bucketed object.
pub struct DeclarationEmitter<'a> {
    graph: &'a ObjectGraph,
    registry: &'a MemberRegistry,
    cache: &'a ObjectCache,
    container_id: Option<ObjectId>,
    typed_field_id: Option<ObjectId>,
}

impl<'a> DeclarationEmitter<'a> {
    pub fn new(
        graph: &'a ObjectGraph,
        registry: &'a MemberRegistry,
        cache: &'a ObjectCache,
        ctx: &GenerationContext,
    ) -> Self {
        Self {
            graph,
            registry,
            cache,
            container_id: graph.find_class_by_full_name(&ctx.config.container_class),
            typed_field_id: graph.find_class_by_full_name(&ctx.config.typed_field_class),
        }
    }

    pub fn emit_all(&self, ctx: &mut GenerationContext) -> Vec<PackageOutput> {
        ctx.duplicate_counts = self.cache.name_counts().clone();
        let packages: Vec<ObjectId> = self.cache.packages().map(|(id, _)| *id).collect();
        packages
            .into_iter()
            .map(|package| self.emit_package(package, ctx))
            .collect()
    }

    pub fn emit_package(&self, package: ObjectId, ctx: &mut GenerationContext) -> PackageOutput {
        let empty = PackageBucket::default();
        let bucket = self.cache.bucket(package).unwrap_or(&empty).clone();
        let mut buffers = EmitBuffers {
            structs: String::new(),
            classes: String::new(),
            parameters: String::new(),
            functions: String::new(),
        };

        for id in &bucket.constants {
            self.emit_constant(*id, package, &mut buffers.classes, ctx);
        }
        for id in &bucket.enums {
            self.emit_enum(*id, &mut buffers.classes, ctx);
        }
        for id in &bucket.aggregates {
            self.ensure_aggregate(*id, package, &mut buffers, ctx);
        }
        for id in &bucket.classes {
            self.ensure_aggregate(*id, package, &mut buffers, ctx);
        }
        for id in &bucket.functions {
            self.emit_function(*id, &mut buffers, ctx);
        }

        let name = {
            let sanitized = sanitize_identifier(&self.graph.node(package).name);
            if sanitized.is_empty() || sanitized == "_" {
                crate::names::FALLBACK_NAME.to_string()
            } else {
                sanitized
            }
        };
        PackageOutput {
            package,
            name,
            structs: buffers.structs,
            classes: buffers.classes,
            parameters: buffers.parameters,
            functions: buffers.functions,
        }
    }

    fn emit_constant(
        &self,
        id: ObjectId,
        package: ObjectId,
        out: &mut String,
        ctx: &mut GenerationContext,
    ) {
        let node = self.graph.node(id);
        // Default/uninitialized template instances are bookkeeping, not
        // constants.
        if node.is_pseudo_default() {
            return;
        }
        let name = ctx.names.resolve(NameScope::Package(package), &node.name);
        let value = node.constant_value.as_deref().unwrap_or("0");
        let _ = writeln!(out, "#define CONST_{} {}", name, value);
    }

    fn emit_enum(&self, id: ObjectId, out: &mut String, ctx: &mut GenerationContext) {
        let node = self.graph.node(id);
        let enum_name = ctx.type_name(self.graph, id);
        let full_name = ctx.derived_names(self.graph, id).full_name.clone();
        let scope = NameScope::Type(id);
        let scoped = ctx.config.scoped_enums;

        let _ = writeln!(out, "// Enum {}", full_name);
        if scoped {
            let _ = writeln!(out, "enum class {} : uint8_t {{", enum_name);
        } else {
            let _ = writeln!(out, "enum {} {{", enum_name);
        }
        let count = node.enum_members.len();
        for (ordinal, raw) in node.enum_members.iter().enumerate() {
            let is_terminal = ordinal + 1 == count;
            let member = ctx
                .names
                .resolve_enum_member(scope, &enum_name, raw, is_terminal, scoped);
            let _ = writeln!(out, "\t{} = {},", member, ordinal);
        }
        let _ = writeln!(out, "}};");
        let _ = writeln!(out);
    }

    /// Emit an aggregate after its dependencies, tolerating self-reference
    /// through the in-progress marker.
    fn ensure_aggregate(
        &self,
        id: ObjectId,
        package: ObjectId,
        buffers: &mut EmitBuffers,
        ctx: &mut GenerationContext,
    ) {
        let node = self.graph.node(id);
        if !node.kind.is_aggregate() || !ctx.begin_aggregate(id) {
            return;
        }

        if let Some(ancestor) = node.ancestor {
            if self.graph.package_of(ancestor) == package {
                self.ensure_aggregate(ancestor, package, buffers, ctx);
            }
        }

        if self.container_id == Some(id) {
            self.emit_root_kind(id, RootKind::Container, buffers, ctx);
            ctx.finish_aggregate(id);
            return;
        }
        if self.typed_field_id == Some(id) {
            self.emit_root_kind(id, RootKind::TypedField, buffers, ctx);
            ctx.finish_aggregate(id);
            return;
        }

        let classifier = PropertyClassifier::new(self.graph);
        let properties: Vec<ClassifiedProperty> = node
            .children
            .iter()
            .map(|child| self.graph.node(*child))
            .filter(|child| child.kind == ObjectKind::Property)
            .map(|child| classifier.classify(child, RenderPosition::StorageField, ctx))
            .collect();

        // Nested by-value aggregates must be declared before use.
        for referent in properties.iter().flat_map(|p| p.referents.iter().copied()) {
            if self.graph.node(referent).kind.is_aggregate()
                && self.graph.package_of(referent) == package
            {
                self.ensure_aggregate(referent, package, buffers, ctx);
            }
        }

        let start_offset = self.aggregate_start(node.ancestor);
        let plan = LayoutReconstructor::from_config(&ctx.config).reconstruct(
            NameScope::Type(id),
            start_offset,
            node.total_size,
            properties,
            ctx,
        );

        if plan.overflowed {
            let message = format!(
                "size mismatch for {}: members end at 0x{:X}, authoritative 0x{:X}; declaration skipped",
                self.graph.full_name(id),
                plan.final_cursor,
                node.total_size
            );
            ctx.diag.skip_declaration(&message);
            ctx.finish_aggregate(id);
            return;
        }

        let type_name = ctx.type_name(self.graph, id);
        let ancestor_name = node.ancestor.map(|a| ctx.type_name(self.graph, a));
        let full_name = ctx.derived_names(self.graph, id).full_name.clone();
        let out = match node.kind {
            ObjectKind::Aggregate => &mut buffers.structs,
            _ => &mut buffers.classes,
        };
        Self::render_aggregate(
            out,
            node.kind,
            &full_name,
            &type_name,
            ancestor_name.as_deref(),
            start_offset,
            node.total_size.max(plan.final_cursor),
            &plan.entries,
        );
        ctx.finish_aggregate(id);
    }

    /// Root aggregate kinds are not enumerable through the graph; their
    /// members come from the registry. Partial-failure on bad registration.
    fn emit_root_kind(
        &self,
        id: ObjectId,
        kind: RootKind,
        buffers: &mut EmitBuffers,
        ctx: &mut GenerationContext,
    ) {
        let node = self.graph.node(id);
        let members = self.registry.members_of(kind);
        if members.is_empty() {
            let message = format!(
                "no members registered for root kind {}; skipping {}",
                kind,
                self.graph.full_name(id)
            );
            ctx.diag.skip_declaration(&message);
            return;
        }

        let registered = self.registry.registered_size_of(kind);
        let authoritative = if node.total_size != 0 {
            node.total_size
        } else {
            registered
        };
        if registered > authoritative {
            let message = format!(
                "size mismatch for {}: registered members end at 0x{:X}, authoritative 0x{:X}; declaration skipped",
                self.graph.full_name(id),
                registered,
                authoritative
            );
            ctx.diag.skip_declaration(&message);
            return;
        }

        let start_offset = self.registry.base_offset_of(kind);
        let mut entries: Vec<LayoutEntry> = members
            .iter()
            .map(|m| {
                LayoutEntry::member(m.name.clone(), m.type_label.clone(), m.offset, m.size, 1)
            })
            .collect();
        if authoritative > registered && authoritative - registered >= ctx.config.min_alignment {
            let name = ctx
                .names
                .resolve(NameScope::Type(id), &format!("UnknownData{:02X}", 0));
            entries.push(LayoutEntry::padding(
                name,
                PaddingKind::DynamicFieldPadding,
                registered,
                authoritative - registered,
            ));
        }

        let type_name = ctx.type_name(self.graph, id);
        let ancestor_name = kind.ancestor().map(|a| a.type_name().to_string());
        let full_name = ctx.derived_names(self.graph, id).full_name.clone();
        Self::render_aggregate(
            &mut buffers.classes,
            ObjectKind::TypedAggregate,
            &full_name,
            &type_name,
            ancestor_name.as_deref(),
            start_offset,
            authoritative,
            &entries,
        );
    }

    fn emit_function(&self, id: ObjectId, buffers: &mut EmitBuffers, ctx: &mut GenerationContext) {
        let rendered = crate::emit::functions::SignatureBuilder::new(self.graph).build(id, ctx);
        buffers.parameters.push_str(&rendered.parameter_block);
        buffers.functions.push_str(&rendered.body);
    }

    /// New members of a derived aggregate begin at the end of its ancestor.
    fn aggregate_start(&self, ancestor: Option<ObjectId>) -> u32 {
        match ancestor {
            Some(ancestor_id) => {
                let node = self.graph.node(ancestor_id);
                if node.total_size != 0 {
                    node.total_size
                } else if self.container_id == Some(ancestor_id) {
                    self.registry.registered_size_of(RootKind::Container)
                } else if self.typed_field_id == Some(ancestor_id) {
                    self.registry.registered_size_of(RootKind::TypedField)
                } else {
                    0
                }
            }
            None => 0,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_aggregate(
        out: &mut String,
        kind: ObjectKind,
        full_name: &str,
        type_name: &str,
        ancestor_name: Option<&str>,
        start_offset: u32,
        total_size: u32,
        entries: &[LayoutEntry],
    ) {
        let keyword = match kind {
            ObjectKind::Aggregate => "struct",
            _ => "class",
        };
        let kind_word = match kind {
            ObjectKind::Aggregate => "Struct",
            _ => "Class",
        };
        let _ = writeln!(out, "// {} {}", kind_word, full_name);
        if start_offset > 0 {
            let _ = writeln!(
                out,
                "// 0x{:04X} (0x{:04X} - 0x{:04X})",
                total_size - start_offset,
                total_size,
                start_offset
            );
        } else {
            let _ = writeln!(out, "// 0x{:04X}", total_size);
        }
        match ancestor_name {
            Some(ancestor) => {
                let _ = writeln!(out, "{} {} : public {} {{", keyword, type_name, ancestor);
            }
            None => {
                let _ = writeln!(out, "{} {} {{", keyword, type_name);
            }
        }
        for entry in entries {
            let _ = writeln!(out, "{}", Self::render_entry(entry));
        }
        let _ = writeln!(out, "}}; // size: 0x{:04X}", total_size);
        let _ = writeln!(out);
    }

    fn render_entry(entry: &LayoutEntry) -> String {
        let annotation = entry.annotation();
        if entry.is_synthetic() || entry.unknown_property {
            return format!(
                "\tunsigned char {}[0x{:X}]; // {}",
                entry.name,
                entry.span(),
                annotation
            );
        }
        if entry.bit_mask.is_some() {
            return format!("\t{} {} : 1; // {}", entry.type_text, entry.name, annotation);
        }
        if entry.array_dim > 1 {
            return format!(
                "\t{} {}[0x{:X}]; // {}",
                entry.type_text, entry.name, entry.array_dim, annotation
            );
        }
        format!("\t{} {}; // {}", entry.type_text, entry.name, annotation)
    }
}
