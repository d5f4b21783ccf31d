// Thu Feb 5 2026 - Alex

use crate::cache::ObjectCache;
use crate::config::GeneratorConfig;
use crate::context::GenerationContext;
use crate::diag::Diagnostics;
use crate::emit::{DeclarationEmitter, PackageOutput};
use crate::error::GeneratorError;
use crate::graph::{GraphSnapshot, ObjectGraph};
use crate::output::OutputTarget;
use crate::registry::MemberRegistry;
use std::fmt;
use std::fs;
use std::path::Path;

/// Counters for one completed generation run.
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub packages: usize,
    pub files_written: usize,
    pub skipped_declarations: usize,
    pub unknown_properties: usize,
    pub added_padding_events: usize,
    pub unresolved_callbacks: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} packages, {} files written, {} declarations skipped, {} unknown properties, {} unresolved callbacks",
            self.packages,
            self.files_written,
            self.skipped_declarations,
            self.unknown_properties,
            self.unresolved_callbacks
        )
    }
}

/// Top-level driver. Owns the immutable run inputs; all mutable run state
/// lives in the `GenerationContext` built per run.
pub struct Generator {
    graph: ObjectGraph,
    registry: MemberRegistry,
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(graph: ObjectGraph, config: GeneratorConfig) -> Result<Self, GeneratorError> {
        config.validate().map_err(GeneratorError::Config)?;
        let registry = MemberRegistry::with_defaults(&config);
        Ok(Self { graph, registry, config })
    }

    /// Loads a reflection table snapshot from a JSON file.
    pub fn from_snapshot_file(
        path: &Path,
        config: GeneratorConfig,
    ) -> Result<Self, GeneratorError> {
        let text = fs::read_to_string(path)?;
        let snapshot: GraphSnapshot = serde_json::from_str(&text)?;
        let graph = ObjectGraph::from_snapshot(snapshot)?;
        Self::new(graph, config)
    }

    pub fn with_registry(mut self, registry: MemberRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn graph(&self) -> &ObjectGraph {
        &self.graph
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produces the per-package declaration texts without touching the
    /// filesystem. Output depends only on the graph, the registry and the
    /// config carried by `ctx`.
    pub fn generate(&self, ctx: &mut GenerationContext) -> Vec<PackageOutput> {
        let cache = ObjectCache::build(&self.graph);
        let emitter = DeclarationEmitter::new(&self.graph, &self.registry, &cache, ctx);
        emitter.emit_all(ctx)
    }

    /// Full run: validate the output target, generate, write headers. The
    /// target check happens before any graph work so a misconfigured run
    /// fails without partial output.
    pub fn run(&self, diag: Diagnostics) -> Result<RunSummary, GeneratorError> {
        let target = OutputTarget::new(self.config.output_dir.as_deref())?;
        target.prepare()?;

        let mut ctx = GenerationContext::new(self.config.clone(), diag);
        let outputs = self.generate(&mut ctx);

        let mut files_written = 0;
        for output in &outputs {
            files_written += target.write_package(output)?.len();
        }

        Ok(RunSummary {
            packages: outputs.len(),
            files_written,
            skipped_declarations: ctx.diag.skipped_declarations,
            unknown_properties: ctx.diag.unknown_properties,
            added_padding_events: ctx.diag.added_padding_events,
            unresolved_callbacks: ctx.diag.unresolved_callbacks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{
        ObjectId, ObjectKind, PropertyFlags, RawProperty, RawPropertyKind, ReflectedObject,
    };

    fn sample_graph() -> ObjectGraph {
        let package = ReflectedObject::new(ObjectId(0), "Engine", ObjectKind::Package);
        let vector = ReflectedObject::new(ObjectId(1), "Vector", ObjectKind::Aggregate)
            .with_outer(ObjectId(0))
            .with_total_size(0xC)
            .with_children(vec![ObjectId(2), ObjectId(3), ObjectId(4)]);
        let x = ReflectedObject::new(ObjectId(2), "X", ObjectKind::Property)
            .with_outer(ObjectId(1))
            .with_property(RawProperty::new(RawPropertyKind::Float, 4, 0x0));
        let y = ReflectedObject::new(ObjectId(3), "Y", ObjectKind::Property)
            .with_outer(ObjectId(1))
            .with_property(RawProperty::new(RawPropertyKind::Float, 4, 0x4));
        let z = ReflectedObject::new(ObjectId(4), "Z", ObjectKind::Property)
            .with_outer(ObjectId(1))
            .with_property(RawProperty::new(RawPropertyKind::Float, 4, 0x8));
        let state = ReflectedObject::new(ObjectId(5), "EState", ObjectKind::Enum)
            .with_outer(ObjectId(0))
            .with_enum_members(vec!["Idle", "Firing", "EState_MAX"]);
        let func = ReflectedObject::new(ObjectId(6), "GetHealth", ObjectKind::Function)
            .with_outer(ObjectId(0))
            .with_children(vec![ObjectId(7)]);
        let ret = ReflectedObject::new(ObjectId(7), "ReturnValue", ObjectKind::Property)
            .with_outer(ObjectId(6))
            .with_property(RawProperty::new(RawPropertyKind::Float, 4, 0x0).with_flags(
                PropertyFlags::PARAM | PropertyFlags::OUT_PARAM | PropertyFlags::RETURN_PARAM,
            ));
        ObjectGraph::new(vec![package, vector, x, y, z, state, func, ret])
    }

    #[test]
    fn test_missing_output_target_fails_before_generation() {
        let generator = Generator::new(sample_graph(), GeneratorConfig::default()).unwrap();
        let err = generator.run(Diagnostics::disabled()).err().unwrap();
        assert!(matches!(err, GeneratorError::MissingOutputTarget));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig::default().with_min_alignment(0);
        assert!(matches!(
            Generator::new(sample_graph(), config),
            Err(GeneratorError::Config(_))
        ));
    }

    #[test]
    fn test_two_runs_produce_identical_output() {
        let config = GeneratorConfig::default().with_dispatch_callback(0x1000);
        let generator = Generator::new(sample_graph(), config.clone()).unwrap();

        let mut first_ctx = GenerationContext::new(config.clone(), Diagnostics::disabled());
        let first = generator.generate(&mut first_ctx);
        let mut second_ctx = GenerationContext::new(config, Diagnostics::disabled());
        let second = generator.generate(&mut second_ctx);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.structs, b.structs);
            assert_eq!(a.classes, b.classes);
            assert_eq!(a.parameters, b.parameters);
            assert_eq!(a.functions, b.functions);
        }
    }

    #[test]
    fn test_context_reset_matches_fresh_run() {
        let config = GeneratorConfig::default();
        let generator = Generator::new(sample_graph(), config.clone()).unwrap();

        let mut ctx = GenerationContext::new(config.clone(), Diagnostics::disabled());
        let first = generator.generate(&mut ctx);
        ctx.reset();
        let again = generator.generate(&mut ctx);
        let mut fresh_ctx = GenerationContext::new(config, Diagnostics::disabled());
        let fresh = generator.generate(&mut fresh_ctx);

        assert_eq!(again.len(), fresh.len());
        for (a, b) in again.iter().zip(fresh.iter()) {
            assert_eq!(a.classes, b.classes);
            assert_eq!(a.structs, b.structs);
        }
        assert_eq!(first.len(), again.len());
    }

    #[test]
    fn test_run_writes_headers() {
        let dir = std::env::temp_dir().join("sdkgen_generator_test");
        let _ = std::fs::remove_dir_all(&dir);
        let config = GeneratorConfig::default()
            .with_output_dir(dir.clone())
            .with_dispatch_callback(0x1000);
        let generator = Generator::new(sample_graph(), config).unwrap();

        let summary = generator.run(Diagnostics::disabled()).unwrap();
        assert_eq!(summary.packages, 1);
        assert!(summary.files_written >= 2);
        assert!(dir.join("Engine_structs.h").exists());
        assert!(dir.join("Engine_classes.h").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
