// Mon Feb 2 2026 - Alex

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which of the two root aggregate kinds physically carries the logical
/// ancestor-field member. Game-dependent and not self-describing in the
/// reflected data, so it is an explicit run input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AncestorFieldLocation {
    Container,
    TypedField,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub output_dir: Option<PathBuf>,
    /// Gaps below this many bytes are accepted as silent slop.
    pub min_alignment: u32,
    /// When set, aggregates are rounded up to the next multiple of this
    /// stride with an ADDED PADDING entry.
    pub padding_stride: Option<u32>,
    pub ancestor_field_location: AncestorFieldLocation,
    /// Whether the output convention supports scoped enumerators. When
    /// false, enum values are prefixed with the enum's own name.
    pub scoped_enums: bool,
    /// Full path name of the root container class in the input graph.
    pub container_class: String,
    /// Full path name of the typed-field derivative of the container class.
    pub typed_field_class: String,
    /// Externally resolved address of the dispatch callback referenced by
    /// generated function bodies. Supplied, never computed here.
    pub dispatch_callback_address: Option<u64>,
    pub verbose: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            min_alignment: 4,
            padding_stride: None,
            ancestor_field_location: AncestorFieldLocation::TypedField,
            scoped_enums: true,
            container_class: "Core.Container".to_string(),
            typed_field_class: "Core.TypedField".to_string(),
            dispatch_callback_address: None,
            verbose: false,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    pub fn with_min_alignment(mut self, alignment: u32) -> Self {
        self.min_alignment = alignment;
        self
    }

    pub fn with_padding_stride(mut self, stride: u32) -> Self {
        self.padding_stride = Some(stride);
        self
    }

    pub fn with_ancestor_field_location(mut self, location: AncestorFieldLocation) -> Self {
        self.ancestor_field_location = location;
        self
    }

    pub fn with_scoped_enums(mut self, scoped: bool) -> Self {
        self.scoped_enums = scoped;
        self
    }

    pub fn with_dispatch_callback(mut self, address: u64) -> Self {
        self.dispatch_callback_address = Some(address);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_alignment == 0 {
            return Err("min_alignment must be greater than 0".to_string());
        }
        if let Some(stride) = self.padding_stride {
            if stride == 0 || !stride.is_power_of_two() {
                return Err("padding_stride must be a non-zero power of two".to_string());
            }
        }
        if self.container_class.is_empty() || self.typed_field_class.is_empty() {
            return Err("root class paths must not be empty".to_string());
        }
        Ok(())
    }
}
