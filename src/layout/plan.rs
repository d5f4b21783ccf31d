// Wed Feb 4 2026 - Alex

use std::fmt;

/// Why a synthetic padding entry exists. The tag strings are a load-bearing
/// contract for downstream diffing and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingKind {
    /// Gap between the cursor and the next member's declared offset.
    MissedOffset,
    /// Remainder between the last member and the authoritative total size.
    DynamicFieldPadding,
    /// Reconciles a member whose reflected size disagrees with its correct
    /// storage size.
    FixWrongSize,
    /// Round-up to the configured stride multiple.
    AddedPadding,
}

impl PaddingKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::MissedOffset => "MISSED OFFSET",
            Self::DynamicFieldPadding => "DYNAMIC FIELD PADDING",
            Self::FixWrongSize => "FIX WRONG SIZE OF PREVIOUS PROPERTY",
            Self::AddedPadding => "ADDED PADDING",
        }
    }
}

/// One line of a reconstructed aggregate: a real member or synthetic filler.
#[derive(Debug, Clone)]
pub struct LayoutEntry {
    /// Emitted, collision-free name.
    pub name: String,
    pub type_text: String,
    pub offset: u32,
    /// Per-element size; multiply by `array_dim` for the occupied span.
    pub size: u32,
    pub array_dim: u32,
    pub bit_mask: Option<u8>,
    pub padding: Option<PaddingKind>,
    /// Retained placeholder for a property that failed classification.
    pub unknown_property: bool,
}

impl LayoutEntry {
    pub fn member(name: String, type_text: String, offset: u32, size: u32, array_dim: u32) -> Self {
        Self {
            name,
            type_text,
            offset,
            size,
            array_dim,
            bit_mask: None,
            padding: None,
            unknown_property: false,
        }
    }

    pub fn padding(name: String, kind: PaddingKind, offset: u32, size: u32) -> Self {
        Self {
            name,
            type_text: "unsigned char".to_string(),
            offset,
            size,
            array_dim: 1,
            bit_mask: None,
            padding: Some(kind),
            unknown_property: false,
        }
    }

    pub fn with_bit_mask(mut self, mask: u8) -> Self {
        self.bit_mask = Some(mask);
        self
    }

    pub fn with_unknown_property(mut self) -> Self {
        self.unknown_property = true;
        self
    }

    pub fn is_synthetic(&self) -> bool {
        self.padding.is_some()
    }

    pub fn span(&self) -> u32 {
        self.size * self.array_dim.max(1)
    }

    /// Trailing annotation comment: offset and occupied size in hex, bit
    /// mask for bit-packed booleans, tag for synthetic/unknown entries.
    pub fn annotation(&self) -> String {
        let mut text = format!("0x{:04X}(0x{:04X})", self.offset, self.span());
        if let Some(mask) = self.bit_mask {
            text.push_str(&format!(" BitMask: 0x{:02X}", mask));
        }
        if let Some(kind) = self.padding {
            text.push(' ');
            text.push_str(kind.tag());
        }
        if self.unknown_property {
            text.push_str(" UNKNOWN PROPERTY");
        }
        text
    }

    pub fn end_offset(&self) -> u32 {
        self.offset + self.span()
    }
}

impl fmt::Display for LayoutEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} // {}", self.type_text, self.name, self.annotation())
    }
}

/// The computed, offset-ordered member+padding list for one aggregate.
/// Built fresh per aggregate generation and never persisted.
#[derive(Debug, Clone)]
pub struct LayoutPlan {
    pub start_offset: u32,
    pub authoritative_size: u32,
    pub entries: Vec<LayoutEntry>,
    /// End of the last occupied byte, stride round-up included.
    pub final_cursor: u32,
    pub stride_padded: bool,
    /// Members ran past the authoritative size. The declaration would lie
    /// about its size, so the caller must not emit it silently.
    pub overflowed: bool,
}

impl LayoutPlan {
    pub fn computed_size(&self) -> u32 {
        self.final_cursor
    }

    pub fn padding_entries(&self) -> impl Iterator<Item = &LayoutEntry> {
        self.entries.iter().filter(|e| e.is_synthetic())
    }

    /// Walk the plan the way a downstream consumer would: every gap below
    /// the granularity threshold, and a final cursor that reaches the
    /// authoritative size (or the stride-padded size past it).
    pub fn verify_coverage(&self, min_alignment: u32) -> bool {
        let mut cursor = self.start_offset;
        for entry in &self.entries {
            if entry.offset > cursor && entry.offset - cursor >= min_alignment {
                return false;
            }
            cursor = cursor.max(entry.end_offset());
        }
        if self.overflowed {
            return cursor >= self.authoritative_size;
        }
        cursor >= self.authoritative_size
            || self.authoritative_size - cursor < min_alignment
    }
}
