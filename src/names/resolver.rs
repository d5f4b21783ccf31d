// Tue Feb 3 2026 - Alex

use crate::graph::{ObjectGraph, ObjectId};
use std::collections::{HashMap, HashSet};

/// Substituted when a raw name carries no legal characters at all.
pub const FALLBACK_NAME: &str = "UnknownName";

/// Naming scope a resolved identifier is unique within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameScope {
    Global,
    Package(ObjectId),
    /// An aggregate, enum or function owning its member names.
    Type(ObjectId),
}

/// Replace every character illegal in a C-style identifier with an
/// underscore, collapsing runs so garbage input shrinks instead of
/// ballooning. Does not apply the fallback; callers decide that.
pub fn sanitize_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_was_underscore = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_was_underscore = false;
        } else if !last_was_underscore {
            out.push('_');
            last_was_underscore = true;
        }
    }
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Per-run mapping from (scope, base name) to the next free disambiguation
/// suffix. Reset at the start of every generation run.
#[derive(Default)]
pub struct NameRegistry {
    counts: HashMap<(NameScope, String), u32>,
    used: HashSet<(NameScope, String)>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.counts.clear();
        self.used.clear();
    }

    /// Produce a legal identifier for `raw`, unique within `scope` for the
    /// current run. Collisions take the lowest unused two-digit suffix
    /// starting at 00.
    pub fn resolve(&mut self, scope: NameScope, raw: &str) -> String {
        let sanitized = sanitize_identifier(raw);
        let base = if sanitized.is_empty() || sanitized == "_" {
            FALLBACK_NAME.to_string()
        } else {
            sanitized
        };

        let key = (scope, base.clone());
        let mut suffix = self.counts.get(&key).copied().unwrap_or(0);
        let mut candidate = Self::candidate(&base, suffix);
        while self.used.contains(&(scope, candidate.clone())) {
            suffix += 1;
            candidate = Self::candidate(&base, suffix);
        }
        self.counts.insert(key, suffix + 1);
        self.used.insert((scope, candidate.clone()));
        candidate
    }

    fn candidate(base: &str, suffix: u32) -> String {
        if suffix == 0 {
            base.to_string()
        } else {
            format!("{}{:02}", base, suffix - 1)
        }
    }

    /// Enum members: a terminal `*_MAX` sentinel becomes `*_END`, and when
    /// the output convention cannot scope enumerators, every member is
    /// prefixed with the enum's own name.
    pub fn resolve_enum_member(
        &mut self,
        scope: NameScope,
        enum_name: &str,
        raw: &str,
        is_terminal: bool,
        scoped_enums: bool,
    ) -> String {
        let mut name = raw.to_string();
        if is_terminal && name.ends_with("_MAX") {
            name.truncate(name.len() - "_MAX".len());
            name.push_str("_END");
        }
        if !scoped_enums {
            name = format!("{}_{}", enum_name, name);
        }
        self.resolve(scope, &name)
    }
}

/// Name for a generated aggregate/enum type. Not suffix-deduplicated: the
/// same object must render to the same name every time it is referenced, so
/// duplicates across the flat output namespace are resolved by qualifying
/// with the outer scope's name instead.
pub fn resolve_type_name(
    graph: &ObjectGraph,
    duplicate_counts: &HashMap<String, usize>,
    id: ObjectId,
) -> String {
    let node = graph.node(id);
    let sanitized = sanitize_identifier(&node.name);
    let base = if sanitized.is_empty() || sanitized == "_" {
        FALLBACK_NAME.to_string()
    } else {
        sanitized
    };

    let duplicated = duplicate_counts.get(&node.name).copied().unwrap_or(0) > 1;
    match (duplicated, node.outer) {
        (true, Some(outer)) => {
            let outer_name = sanitize_identifier(&graph.node(outer).name);
            format!("{}_{}", outer_name, base)
        }
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ObjectKind, ReflectedObject};

    #[test]
    fn test_sanitize_replaces_illegal_chars() {
        assert_eq!(sanitize_identifier("Hit Result"), "Hit_Result");
        assert_eq!(sanitize_identifier("a:b?c"), "a_b_c");
        assert_eq!(sanitize_identifier("9Lives"), "_9Lives");
    }

    #[test]
    fn test_garbage_name_gets_fallback() {
        // A raw name with no legal characters at all.
        let mut names = NameRegistry::new();
        assert_eq!(names.resolve(NameScope::Global, "!!!"), FALLBACK_NAME);
        assert_eq!(names.resolve(NameScope::Global, ""), "UnknownName00");
    }

    #[test]
    fn test_collision_suffixes_start_at_zero() {
        let mut names = NameRegistry::new();
        let scope = NameScope::Type(ObjectId(1));
        assert_eq!(names.resolve(scope, "Value"), "Value");
        assert_eq!(names.resolve(scope, "Value"), "Value00");
        assert_eq!(names.resolve(scope, "Value"), "Value01");
    }

    #[test]
    fn test_scopes_are_independent() {
        let mut names = NameRegistry::new();
        assert_eq!(names.resolve(NameScope::Type(ObjectId(1)), "X"), "X");
        assert_eq!(names.resolve(NameScope::Type(ObjectId(2)), "X"), "X");
    }

    #[test]
    fn test_resolution_is_deterministic_across_runs() {
        let raws = ["A", "B", "A", "!!!", "A", "B"];
        let run = || {
            let mut names = NameRegistry::new();
            raws.iter()
                .map(|raw| names.resolve(NameScope::Global, raw))
                .collect::<Vec<_>>()
        };
        let first = run();
        let second = run();
        assert_eq!(first, second);
        let distinct: std::collections::HashSet<_> = first.iter().collect();
        assert_eq!(distinct.len(), raws.len());
    }

    #[test]
    fn test_enum_member_sentinel_and_prefix() {
        let mut names = NameRegistry::new();
        let scope = NameScope::Type(ObjectId(3));
        assert_eq!(
            names.resolve_enum_member(scope, "EState", "EState_MAX", true, true),
            "EState_END"
        );
        assert_eq!(
            names.resolve_enum_member(scope, "EState", "Idle", false, false),
            "EState_Idle"
        );
    }

    #[test]
    fn test_duplicate_type_names_qualified_by_outer() {
        let package = ReflectedObject::new(ObjectId(0), "Engine", ObjectKind::Package);
        let outer_a = ReflectedObject::new(ObjectId(1), "Weapon", ObjectKind::TypedAggregate)
            .with_outer(ObjectId(0));
        let outer_b = ReflectedObject::new(ObjectId(2), "Vehicle", ObjectKind::TypedAggregate)
            .with_outer(ObjectId(0));
        let dup_a = ReflectedObject::new(ObjectId(3), "State", ObjectKind::Aggregate)
            .with_outer(ObjectId(1));
        let dup_b = ReflectedObject::new(ObjectId(4), "State", ObjectKind::Aggregate)
            .with_outer(ObjectId(2));
        let graph = ObjectGraph::new(vec![package, outer_a, outer_b, dup_a, dup_b]);

        let mut counts = HashMap::new();
        counts.insert("State".to_string(), 2usize);

        assert_eq!(resolve_type_name(&graph, &counts, ObjectId(3)), "Weapon_State");
        assert_eq!(resolve_type_name(&graph, &counts, ObjectId(4)), "Vehicle_State");

        let no_dups = HashMap::new();
        assert_eq!(resolve_type_name(&graph, &no_dups, ObjectId(3)), "State");
    }
}
