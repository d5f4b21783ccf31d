// Mon Feb 2 2026 - Alex

use crate::graph::object::{ObjectId, ObjectKind, ReflectedObject};
use ahash::AHasher;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Serialized form of a fully-populated reflection table snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<ReflectedObject>,
}

/// The reflected object graph. Injected once at run start and read-only for
/// the duration of a generation run.
pub struct ObjectGraph {
    nodes: Vec<ReflectedObject>,
    classes_by_full_name: HashMap<String, ObjectId, ahash::RandomState>,
}

impl ObjectGraph {
    pub fn new(nodes: Vec<ReflectedObject>) -> Self {
        let mut graph = Self {
            nodes,
            classes_by_full_name: HashMap::default(),
        };
        for index in 0..graph.nodes.len() {
            let id = ObjectId(index as u32);
            if graph.nodes[index].kind.is_aggregate() {
                let full = graph.full_name(id);
                graph.classes_by_full_name.insert(full, id);
            }
        }
        graph
    }

    pub fn from_snapshot(snapshot: GraphSnapshot) -> crate::Result<Self> {
        for (index, node) in snapshot.nodes.iter().enumerate() {
            if node.id.index() != index {
                return Err(crate::GeneratorError::InvalidSnapshot(format!(
                    "node {} has id {}, expected {}",
                    index, node.id, index
                )));
            }
            for child in &node.children {
                if child.index() >= snapshot.nodes.len() {
                    return Err(crate::GeneratorError::InvalidSnapshot(format!(
                        "node {} references missing child {}",
                        node.id, child
                    )));
                }
            }
        }
        Ok(Self::new(snapshot.nodes))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Raw root listing of all nodes.
    pub fn iter(&self) -> impl Iterator<Item = &ReflectedObject> {
        self.nodes.iter()
    }

    pub fn get(&self, id: ObjectId) -> Option<&ReflectedObject> {
        self.nodes.get(id.index())
    }

    /// Panics on an id that did not come from this graph.
    pub fn node(&self, id: ObjectId) -> &ReflectedObject {
        &self.nodes[id.index()]
    }

    /// Full-path name: outer chain joined with dots, root first.
    pub fn full_name(&self, id: ObjectId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(cursor) = current {
            let node = self.node(cursor);
            parts.push(node.name.as_str());
            current = node.outer;
        }
        parts.reverse();
        parts.join(".")
    }

    /// Root of the outer chain. Returns the node itself when it has no
    /// outer, which makes packages their own package.
    pub fn package_of(&self, id: ObjectId) -> ObjectId {
        let mut cursor = id;
        while let Some(outer) = self.node(cursor).outer {
            cursor = outer;
        }
        cursor
    }

    pub fn find_class_by_full_name(&self, full_name: &str) -> Option<ObjectId> {
        self.classes_by_full_name.get(full_name).copied()
    }
}

/// Core-owned metadata derived from a node: assigned kind, computed full
/// name, computed valid name. Cached per run keyed by `stable_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedNames {
    pub kind: ObjectKind,
    pub full_name: String,
    pub valid_name: String,
}

impl DerivedNames {
    /// Deterministic across runs: uses the fixed-key hasher, not the
    /// randomly seeded map state.
    pub fn stable_hash(&self) -> u64 {
        let mut hasher = AHasher::default();
        self.kind.hash(&mut hasher);
        self.full_name.hash(&mut hasher);
        self.valid_name.hash(&mut hasher);
        hasher.finish()
    }
}
