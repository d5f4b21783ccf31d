// Wed Feb 4 2026 - Alex

use crate::graph::{ObjectGraph, ObjectId, ObjectKind};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Per-package buckets of object ids, in graph order.
#[derive(Debug, Default, Clone)]
pub struct PackageBucket {
    pub constants: Vec<ObjectId>,
    pub enums: Vec<ObjectId>,
    pub aggregates: Vec<ObjectId>,
    pub classes: Vec<ObjectId>,
    pub functions: Vec<ObjectId>,
}

impl PackageBucket {
    pub fn declaration_count(&self) -> usize {
        self.constants.len()
            + self.enums.len()
            + self.aggregates.len()
            + self.classes.len()
            + self.functions.len()
    }
}

/// One walk over the full reflected object table, bucketing objects by
/// owning package and kind, memoizing the per-base-name aggregate counts
/// the name resolver uses for disambiguation.
pub struct ObjectCache {
    buckets: IndexMap<ObjectId, PackageBucket>,
    name_counts: HashMap<String, usize>,
}

impl ObjectCache {
    pub fn build(graph: &ObjectGraph) -> Self {
        let mut buckets: IndexMap<ObjectId, PackageBucket> = IndexMap::new();
        let mut name_counts: HashMap<String, usize> = HashMap::new();

        for node in graph.iter() {
            let package = graph.package_of(node.id);
            let bucket = buckets.entry(package).or_default();
            match node.kind {
                ObjectKind::Constant => bucket.constants.push(node.id),
                ObjectKind::Enum => {
                    bucket.enums.push(node.id);
                    *name_counts.entry(node.name.clone()).or_insert(0) += 1;
                }
                ObjectKind::Aggregate => {
                    bucket.aggregates.push(node.id);
                    *name_counts.entry(node.name.clone()).or_insert(0) += 1;
                }
                ObjectKind::TypedAggregate => {
                    bucket.classes.push(node.id);
                    *name_counts.entry(node.name.clone()).or_insert(0) += 1;
                }
                ObjectKind::Function => bucket.functions.push(node.id),
                ObjectKind::Unknown | ObjectKind::Package | ObjectKind::Property => {}
            }
        }

        buckets.retain(|_, bucket| bucket.declaration_count() > 0);
        Self { buckets, name_counts }
    }

    pub fn packages(&self) -> impl Iterator<Item = (&ObjectId, &PackageBucket)> {
        self.buckets.iter()
    }

    pub fn package_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket(&self, package: ObjectId) -> Option<&PackageBucket> {
        self.buckets.get(&package)
    }

    /// How many distinct reflected aggregates share this base name.
    pub fn duplicate_name_count(&self, base_name: &str) -> usize {
        self.name_counts.get(base_name).copied().unwrap_or(0)
    }

    pub fn name_counts(&self) -> &HashMap<String, usize> {
        &self.name_counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ReflectedObject;

    #[test]
    fn test_buckets_by_package_and_kind() {
        let pkg_a = ReflectedObject::new(ObjectId(0), "Core", ObjectKind::Package);
        let pkg_b = ReflectedObject::new(ObjectId(1), "Engine", ObjectKind::Package);
        let class_a = ReflectedObject::new(ObjectId(2), "Actor", ObjectKind::TypedAggregate)
            .with_outer(ObjectId(1));
        let struct_a = ReflectedObject::new(ObjectId(3), "Vector", ObjectKind::Aggregate)
            .with_outer(ObjectId(0));
        let enum_a = ReflectedObject::new(ObjectId(4), "EState", ObjectKind::Enum)
            .with_outer(ObjectId(1));
        let func_a = ReflectedObject::new(ObjectId(5), "Tick", ObjectKind::Function)
            .with_outer(ObjectId(2));
        let graph = ObjectGraph::new(vec![pkg_a, pkg_b, class_a, struct_a, enum_a, func_a]);

        let cache = ObjectCache::build(&graph);
        assert_eq!(cache.package_count(), 2);

        let engine = cache.bucket(ObjectId(1)).unwrap();
        assert_eq!(engine.classes, vec![ObjectId(2)]);
        assert_eq!(engine.enums, vec![ObjectId(4)]);
        // Functions bucket under their owning package via the outer chain.
        assert_eq!(engine.functions, vec![ObjectId(5)]);

        let core = cache.bucket(ObjectId(0)).unwrap();
        assert_eq!(core.aggregates, vec![ObjectId(3)]);
    }

    #[test]
    fn test_duplicate_name_counts() {
        let pkg = ReflectedObject::new(ObjectId(0), "Core", ObjectKind::Package);
        let a = ReflectedObject::new(ObjectId(1), "State", ObjectKind::Aggregate)
            .with_outer(ObjectId(0));
        let b = ReflectedObject::new(ObjectId(2), "State", ObjectKind::Aggregate)
            .with_outer(ObjectId(0));
        let graph = ObjectGraph::new(vec![pkg, a, b]);

        let cache = ObjectCache::build(&graph);
        assert_eq!(cache.duplicate_name_count("State"), 2);
        assert_eq!(cache.duplicate_name_count("Missing"), 0);
    }

    #[test]
    fn test_empty_packages_pruned() {
        let pkg = ReflectedObject::new(ObjectId(0), "Empty", ObjectKind::Package);
        let graph = ObjectGraph::new(vec![pkg]);
        let cache = ObjectCache::build(&graph);
        assert_eq!(cache.package_count(), 0);
    }
}
