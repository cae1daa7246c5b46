//! Per-node input attributes consumed by the solver.

use crate::layout::geometry::{Dimension, PhysicalEdge};
use crate::layout::number::{floats_equal, UNDEFINED};
use crate::layout::spacing::Spacing;

/// Text/layout direction. `Inherit` resolves to the parent's direction at
/// layout time (LTR at the root).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inherit,
    Ltr,
    Rtl,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Inherit
    }
}

/// The main layout axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Column,
    ColumnReverse,
    Row,
    RowReverse,
}

impl Default for FlexDirection {
    fn default() -> Self {
        FlexDirection::Column
    }
}

impl FlexDirection {
    pub(crate) fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    pub(crate) fn is_column(self) -> bool {
        matches!(self, FlexDirection::Column | FlexDirection::ColumnReverse)
    }

    /// Swap row and row-reverse under RTL; columns are unaffected.
    pub(crate) fn resolve(self, direction: Direction) -> FlexDirection {
        if direction == Direction::Rtl {
            match self {
                FlexDirection::Row => FlexDirection::RowReverse,
                FlexDirection::RowReverse => FlexDirection::Row,
                other => other,
            }
        } else {
            self
        }
    }

    /// The axis perpendicular to `self`, resolved for direction.
    pub(crate) fn cross(self, direction: Direction) -> FlexDirection {
        if self.is_column() {
            FlexDirection::Row.resolve(direction)
        } else {
            FlexDirection::Column
        }
    }
}

/// Main-axis distribution of free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
}

impl Default for Justify {
    fn default() -> Self {
        Justify::FlexStart
    }
}

/// Cross-axis alignment for items and lines.
///
/// `Auto` is only meaningful for `align_self`, where it defers to the
/// parent's `align_items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Auto,
    FlexStart,
    Center,
    FlexEnd,
    Stretch,
}

impl Default for Align {
    fn default() -> Self {
        Align::Auto
    }
}

/// Whether a child participates in flex flow or is positioned by offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionType {
    Relative,
    Absolute,
}

impl Default for PositionType {
    fn default() -> Self {
        PositionType::Relative
    }
}

/// Line wrapping behavior on the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexWrap {
    NoWrap,
    Wrap,
}

impl Default for FlexWrap {
    fn default() -> Self {
        FlexWrap::NoWrap
    }
}

/// Absolute-position offsets against the parent's edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offsets {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Offsets {
    fn default() -> Self {
        Self { top: UNDEFINED, bottom: UNDEFINED, left: UNDEFINED, right: UNDEFINED }
    }
}

impl Offsets {
    pub(crate) fn get(&self, edge: PhysicalEdge) -> f32 {
        match edge {
            PhysicalEdge::Left => self.left,
            PhysicalEdge::Top => self.top,
            PhysicalEdge::Right => self.right,
            PhysicalEdge::Bottom => self.bottom,
        }
    }

    fn approx_eq(&self, other: &Offsets) -> bool {
        floats_equal(self.top, other.top)
            && floats_equal(self.bottom, other.bottom)
            && floats_equal(self.left, other.left)
            && floats_equal(self.right, other.right)
    }
}

/// The full set of input attributes for one node.
///
/// Numeric fields default to the undefined sentinel ("auto"); a dimension
/// only constrains layout when it is defined and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub direction: Direction,
    pub flex_direction: FlexDirection,
    pub justify_content: Justify,
    /// Default cross-axis alignment for children. Defaults to `Stretch`.
    pub align_items: Align,
    /// Per-child override of the parent's `align_items`; `Auto` inherits.
    pub align_self: Align,
    /// Alignment of lines when wrapping produces more than one.
    pub align_content: Align,
    pub position_type: PositionType,
    pub flex_wrap: FlexWrap,
    /// Positive values make a relative child expand into free main-axis space.
    pub flex: f32,
    pub width: f32,
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: f32,
    pub max_height: f32,
    pub position: Offsets,
    pub margin: Spacing,
    pub padding: Spacing,
    pub border: Spacing,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            direction: Direction::Inherit,
            flex_direction: FlexDirection::Column,
            justify_content: Justify::FlexStart,
            align_items: Align::Stretch,
            align_self: Align::Auto,
            align_content: Align::FlexStart,
            position_type: PositionType::Relative,
            flex_wrap: FlexWrap::NoWrap,
            flex: 0.0,
            width: UNDEFINED,
            height: UNDEFINED,
            min_width: UNDEFINED,
            min_height: UNDEFINED,
            max_width: UNDEFINED,
            max_height: UNDEFINED,
            position: Offsets::default(),
            margin: Spacing::default(),
            padding: Spacing::default(),
            border: Spacing::default(),
        }
    }
}

impl Style {
    pub(crate) fn dimension(&self, dim: Dimension) -> f32 {
        match dim {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }

    pub(crate) fn min_dimension(&self, dim: Dimension) -> f32 {
        match dim {
            Dimension::Width => self.min_width,
            Dimension::Height => self.min_height,
        }
    }

    pub(crate) fn max_dimension(&self, dim: Dimension) -> f32 {
        match dim {
            Dimension::Width => self.max_width,
            Dimension::Height => self.max_height,
        }
    }

    /// Tolerant comparison backing the idempotent setters: undefined matches
    /// undefined, defined floats compare within the layout tolerance.
    pub(crate) fn approx_eq(&self, other: &Style) -> bool {
        self.direction == other.direction
            && self.flex_direction == other.flex_direction
            && self.justify_content == other.justify_content
            && self.align_items == other.align_items
            && self.align_self == other.align_self
            && self.align_content == other.align_content
            && self.position_type == other.position_type
            && self.flex_wrap == other.flex_wrap
            && floats_equal(self.flex, other.flex)
            && floats_equal(self.width, other.width)
            && floats_equal(self.height, other.height)
            && floats_equal(self.min_width, other.min_width)
            && floats_equal(self.min_height, other.min_height)
            && floats_equal(self.max_width, other.max_width)
            && floats_equal(self.max_height, other.max_height)
            && self.position.approx_eq(&other.position)
            && self.margin.approx_eq(&other.margin)
            && self.padding.approx_eq(&other.padding)
            && self.border.approx_eq(&other.border)
    }
}
