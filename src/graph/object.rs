// Mon Feb 2 2026 - Alex

use crate::graph::property::{FunctionFlags, RawProperty};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a node in the reflected object graph. Indexes into the
/// snapshot's node table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind tag of a reflected object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Unknown,
    Package,
    Constant,
    Enum,
    /// Plain aggregate (struct) whose layout is reconstructed standalone.
    Aggregate,
    /// Inheritance-extended aggregate (class), may own functions.
    TypedAggregate,
    Function,
    Property,
}

impl ObjectKind {
    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::Aggregate | Self::TypedAggregate)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "Unknown",
            Self::Package => "Package",
            Self::Constant => "Constant",
            Self::Enum => "Enum",
            Self::Aggregate => "Aggregate",
            Self::TypedAggregate => "Class",
            Self::Function => "Function",
            Self::Property => "Property",
        };
        write!(f, "{}", s)
    }
}

/// A node of the external reflection table. The graph owns these; the core
/// only derives metadata from them and never mutates a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectedObject {
    pub id: ObjectId,
    /// Short display name, not necessarily a legal identifier.
    pub name: String,
    /// Owning outer scope. Forms a tree whose root is a package.
    #[serde(default)]
    pub outer: Option<ObjectId>,
    /// The node's kind-class reference.
    #[serde(default)]
    pub class_ref: Option<ObjectId>,
    pub kind: ObjectKind,
    /// Ancestor aggregate for inheritance-extended kinds.
    #[serde(default)]
    pub ancestor: Option<ObjectId>,
    /// Declared child nodes in declaration order.
    #[serde(default)]
    pub children: Vec<ObjectId>,
    /// Authoritative total byte size for aggregate kinds.
    #[serde(default)]
    pub total_size: u32,
    /// Ordinal-ordered member names for enum kinds.
    #[serde(default)]
    pub enum_members: Vec<String>,
    /// Literal value for constant kinds.
    #[serde(default)]
    pub constant_value: Option<String>,
    #[serde(default)]
    pub function_flags: FunctionFlags,
    /// Present iff `kind == Property`.
    #[serde(default)]
    pub property: Option<RawProperty>,
}

impl ReflectedObject {
    pub fn new(id: ObjectId, name: &str, kind: ObjectKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            outer: None,
            class_ref: None,
            kind,
            ancestor: None,
            children: Vec::new(),
            total_size: 0,
            enum_members: Vec::new(),
            constant_value: None,
            function_flags: FunctionFlags::empty(),
            property: None,
        }
    }

    pub fn with_outer(mut self, outer: ObjectId) -> Self {
        self.outer = Some(outer);
        self
    }

    pub fn with_class_ref(mut self, class_ref: ObjectId) -> Self {
        self.class_ref = Some(class_ref);
        self
    }

    pub fn with_ancestor(mut self, ancestor: ObjectId) -> Self {
        self.ancestor = Some(ancestor);
        self
    }

    pub fn with_children(mut self, children: Vec<ObjectId>) -> Self {
        self.children = children;
        self
    }

    pub fn with_total_size(mut self, size: u32) -> Self {
        self.total_size = size;
        self
    }

    pub fn with_enum_members(mut self, members: Vec<&str>) -> Self {
        self.enum_members = members.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_constant_value(mut self, value: &str) -> Self {
        self.constant_value = Some(value.to_string());
        self
    }

    pub fn with_function_flags(mut self, flags: FunctionFlags) -> Self {
        self.function_flags = flags;
        self
    }

    pub fn with_property(mut self, property: RawProperty) -> Self {
        self.property = Some(property);
        self
    }

    pub fn is_pseudo_default(&self) -> bool {
        self.name.starts_with("Default__")
    }
}
