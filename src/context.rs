// Tue Feb 3 2026 - Alex

use crate::config::GeneratorConfig;
use crate::diag::Diagnostics;
use crate::graph::{DerivedNames, ObjectGraph, ObjectId};
use crate::names::{resolver, sanitize_identifier, NameRegistry, FALLBACK_NAME};
use std::collections::{HashMap, HashSet};

/// All mutable state of one generation run. Constructed fresh per run; no
/// module-level mutable state exists anywhere in the crate, so two runs over
/// the same snapshot cannot influence each other.
pub struct GenerationContext {
    pub config: GeneratorConfig,
    pub names: NameRegistry,
    pub diag: Diagnostics,
    /// Aggregates already emitted this run. Check-and-mark guards the
    /// at-most-once emission guarantee.
    pub emitted: HashSet<ObjectId>,
    /// Aggregates currently being dependency-walked. Makes self-referential
    /// aggregates terminate instead of recursing forever.
    pub in_progress: HashSet<ObjectId>,
    /// Per-base-name aggregate instance counts from the object cache.
    pub duplicate_counts: HashMap<String, usize>,
    /// Memoized per-object derived metadata, keyed by the stable hash of
    /// (kind, full name, valid name).
    derived: HashMap<u64, DerivedNames>,
    derived_by_id: HashMap<ObjectId, u64>,
    type_names: HashMap<ObjectId, String>,
    pub callback_warning_issued: bool,
}

impl GenerationContext {
    pub fn new(config: GeneratorConfig, diag: Diagnostics) -> Self {
        Self {
            config,
            names: NameRegistry::new(),
            diag,
            emitted: HashSet::new(),
            in_progress: HashSet::new(),
            duplicate_counts: HashMap::new(),
            derived: HashMap::new(),
            derived_by_id: HashMap::new(),
            type_names: HashMap::new(),
            callback_warning_issued: false,
        }
    }

    /// Drop every piece of run-scoped state while keeping config and
    /// diagnostic wiring. After a reset the context behaves like a fresh one.
    pub fn reset(&mut self) {
        self.names.reset();
        self.emitted.clear();
        self.in_progress.clear();
        self.duplicate_counts.clear();
        self.derived.clear();
        self.derived_by_id.clear();
        self.type_names.clear();
        self.callback_warning_issued = false;
    }

    /// Resolved name of a generated type. Memoized: referencing the same
    /// aggregate twice must render the same name.
    pub fn type_name(&mut self, graph: &ObjectGraph, id: ObjectId) -> String {
        if let Some(name) = self.type_names.get(&id) {
            return name.clone();
        }
        let name = resolver::resolve_type_name(graph, &self.duplicate_counts, id);
        self.type_names.insert(id, name.clone());
        name
    }

    /// Core-owned derived metadata for a node.
    pub fn derived_names(&mut self, graph: &ObjectGraph, id: ObjectId) -> &DerivedNames {
        if let Some(hash) = self.derived_by_id.get(&id) {
            return &self.derived[hash];
        }
        let node = graph.node(id);
        let sanitized = sanitize_identifier(&node.name);
        let valid_name = if sanitized.is_empty() || sanitized == "_" {
            FALLBACK_NAME.to_string()
        } else {
            sanitized
        };
        let derived = DerivedNames {
            kind: node.kind,
            full_name: graph.full_name(id),
            valid_name,
        };
        let hash = derived.stable_hash();
        self.derived_by_id.insert(id, hash);
        self.derived.entry(hash).or_insert(derived);
        &self.derived[&self.derived_by_id[&id]]
    }

    /// Check-and-mark. Returns false when the aggregate was already emitted
    /// or is currently in progress further up the walk.
    pub fn begin_aggregate(&mut self, id: ObjectId) -> bool {
        if self.emitted.contains(&id) || self.in_progress.contains(&id) {
            return false;
        }
        self.in_progress.insert(id);
        true
    }

    pub fn finish_aggregate(&mut self, id: ObjectId) {
        self.in_progress.remove(&id);
        self.emitted.insert(id);
    }
}
