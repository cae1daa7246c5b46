//! Per-edge value storage for margin, padding and border.
//!
//! A `Spacing` holds one slot per physical edge plus the logical
//! `Start`/`End` pair and the `Horizontal`/`Vertical`/`All` shorthands.
//! Reads resolve through the shorthand chain; unset slots carry the
//! undefined sentinel so a more specific slot always wins.

use crate::layout::number::{is_defined, UNDEFINED};

/// Storage slot inside a [`Spacing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum SpacingType {
    Left = 0,
    Top = 1,
    Right = 2,
    Bottom = 3,
    /// Logical leading edge of a row axis; maps to left or right with direction.
    Start = 4,
    /// Logical trailing edge of a row axis.
    End = 5,
    Horizontal = 6,
    Vertical = 7,
    All = 8,
}

impl SpacingType {
    /// The axis shorthand consulted when this slot is unset.
    fn axis_fallback(self) -> SpacingType {
        match self {
            SpacingType::Left | SpacingType::Right | SpacingType::Start | SpacingType::End => {
                SpacingType::Horizontal
            }
            _ => SpacingType::Vertical,
        }
    }
}

/// Per-edge numeric vector with shorthand fallback resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    values: [f32; 9],
}

impl Default for Spacing {
    fn default() -> Self {
        Self { values: [UNDEFINED; 9] }
    }
}

impl Spacing {
    /// Write a slot. Writing the undefined sentinel clears it.
    pub fn set(&mut self, slot: SpacingType, value: f32) {
        self.values[slot as usize] = value;
    }

    /// The stored value of a slot, without fallback resolution.
    pub fn raw(&self, slot: SpacingType) -> f32 {
        self.values[slot as usize]
    }

    /// Resolve a slot through `slot -> horizontal/vertical -> all -> 0`.
    pub fn get(&self, slot: SpacingType) -> f32 {
        let direct = self.values[slot as usize];
        if is_defined(direct) {
            return direct;
        }
        let axis = self.values[slot.axis_fallback() as usize];
        if is_defined(axis) {
            return axis;
        }
        let all = self.values[SpacingType::All as usize];
        if is_defined(all) {
            return all;
        }
        0.0
    }

    /// Resolve the first defined value in
    /// `primary -> secondary -> horizontal/vertical -> all -> 0`.
    ///
    /// During layout `primary` is the logical slot for the axis (Start/End on
    /// rows, Top/Bottom on columns) and `secondary` the physical edge.
    pub fn get_with_fallback(&self, primary: SpacingType, secondary: SpacingType) -> f32 {
        let logical = self.values[primary as usize];
        if is_defined(logical) {
            return logical;
        }
        self.get(secondary)
    }

    /// Tolerant comparison used by the idempotent style setters.
    pub(crate) fn approx_eq(&self, other: &Spacing) -> bool {
        self.values
            .iter()
            .zip(other.values.iter())
            .all(|(a, b)| crate::layout::number::floats_equal(*a, *b))
    }
}
