//! Layout results, the relayout cache and axis/edge resolution tables.

use crate::layout::number::UNDEFINED;
use crate::layout::spacing::SpacingType;
use crate::layout::style::{Direction, FlexDirection};

/// Index into the four physical edges of a layout position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum PhysicalEdge {
    Left = 0,
    Top = 1,
    Right = 2,
    Bottom = 3,
}

impl From<PhysicalEdge> for SpacingType {
    fn from(edge: PhysicalEdge) -> SpacingType {
        match edge {
            PhysicalEdge::Left => SpacingType::Left,
            PhysicalEdge::Top => SpacingType::Top,
            PhysicalEdge::Right => SpacingType::Right,
            PhysicalEdge::Bottom => SpacingType::Bottom,
        }
    }
}

/// Index into the two dimensions of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Dimension {
    Width = 0,
    Height = 1,
}

/// The edge where content starts on an axis (top/left, or bottom/right for
/// the reverse variants).
pub(crate) fn leading_edge(axis: FlexDirection) -> PhysicalEdge {
    match axis {
        FlexDirection::Column => PhysicalEdge::Top,
        FlexDirection::ColumnReverse => PhysicalEdge::Bottom,
        FlexDirection::Row => PhysicalEdge::Left,
        FlexDirection::RowReverse => PhysicalEdge::Right,
    }
}

/// The edge where content ends on an axis.
pub(crate) fn trailing_edge(axis: FlexDirection) -> PhysicalEdge {
    match axis {
        FlexDirection::Column => PhysicalEdge::Bottom,
        FlexDirection::ColumnReverse => PhysicalEdge::Top,
        FlexDirection::Row => PhysicalEdge::Right,
        FlexDirection::RowReverse => PhysicalEdge::Left,
    }
}

/// Spacing slot queried first for the leading edge of an axis. Rows consult
/// the logical `Start` slot so RTL start maps to the right physical edge.
pub(crate) fn leading_spacing(axis: FlexDirection) -> SpacingType {
    match axis {
        FlexDirection::Column => SpacingType::Top,
        FlexDirection::ColumnReverse => SpacingType::Bottom,
        FlexDirection::Row | FlexDirection::RowReverse => SpacingType::Start,
    }
}

/// Spacing slot queried first for the trailing edge of an axis.
pub(crate) fn trailing_spacing(axis: FlexDirection) -> SpacingType {
    match axis {
        FlexDirection::Column => SpacingType::Bottom,
        FlexDirection::ColumnReverse => SpacingType::Top,
        FlexDirection::Row | FlexDirection::RowReverse => SpacingType::End,
    }
}

/// The dimension measured along an axis.
pub(crate) fn axis_dimension(axis: FlexDirection) -> Dimension {
    if axis.is_row() {
        Dimension::Width
    } else {
        Dimension::Height
    }
}

/// Per-node layout output: absolute edge positions within the parent, the
/// computed dimensions and the resolved direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    position: [f32; 4],
    dimensions: [f32; 2],
    pub direction: Direction,
    /// Scratch: which wrap line the node was assigned to during the parent's
    /// last solve. Consumed by the align-content pass.
    pub(crate) line_index: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            position: [0.0; 4],
            dimensions: [UNDEFINED; 2],
            direction: Direction::Ltr,
            line_index: 0,
        }
    }
}

impl Layout {
    /// Clear the computed result ahead of a fresh solve. Scratch state is
    /// left alone; the solver rewrites it.
    pub(crate) fn reset_result(&mut self) {
        self.position = [0.0; 4];
        self.dimensions = [UNDEFINED; 2];
        self.direction = Direction::Ltr;
    }

    pub fn position(&self, edge: PhysicalEdge) -> f32 {
        self.position[edge as usize]
    }

    pub fn dimension(&self, dim: Dimension) -> f32 {
        self.dimensions[dim as usize]
    }

    /// Distance from the parent's left content edge.
    pub fn x(&self) -> f32 {
        self.position[PhysicalEdge::Left as usize]
    }

    /// Distance from the parent's top content edge.
    pub fn y(&self) -> f32 {
        self.position[PhysicalEdge::Top as usize]
    }

    pub fn width(&self) -> f32 {
        self.dimensions[Dimension::Width as usize]
    }

    pub fn height(&self) -> f32 {
        self.dimensions[Dimension::Height as usize]
    }

    pub(crate) fn set_position(&mut self, edge: PhysicalEdge, value: f32) {
        self.position[edge as usize] = value;
    }

    pub(crate) fn add_position(&mut self, edge: PhysicalEdge, delta: f32) {
        self.position[edge as usize] += delta;
    }

    pub(crate) fn set_dimension(&mut self, dim: Dimension, value: f32) {
        self.dimensions[dim as usize] = value;
    }

    /// Copy the computed result (not the scratch fields) from another layout.
    pub(crate) fn copy_result_from(&mut self, other: &Layout) {
        self.position = other.position;
        self.dimensions = other.dimensions;
        self.direction = other.direction;
    }
}

/// Memo of the last solve: the inputs it was computed under and the result,
/// so an unchanged subtree can be reused instead of recomputed.
#[derive(Debug, Clone)]
pub struct CachedLayout {
    pub(crate) requested_width: f32,
    pub(crate) requested_height: f32,
    pub(crate) parent_max_width: f32,
    pub(crate) result: Layout,
}

impl Default for CachedLayout {
    fn default() -> Self {
        Self {
            requested_width: UNDEFINED,
            requested_height: UNDEFINED,
            parent_max_width: UNDEFINED,
            result: Layout::default(),
        }
    }
}

/// Caller-owned buffer a measure callback writes its intrinsic size into.
/// Either field may be left undefined to signal "no intrinsic size".
#[derive(Debug, Clone, Copy)]
pub struct MeasureOutput {
    pub width: f32,
    pub height: f32,
}

impl Default for MeasureOutput {
    fn default() -> Self {
        Self { width: UNDEFINED, height: UNDEFINED }
    }
}

impl MeasureOutput {
    pub(crate) fn reset(&mut self) {
        self.width = UNDEFINED;
        self.height = UNDEFINED;
    }
}
