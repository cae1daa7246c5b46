//! The recursive constraint solver.
//!
//! `layout_node` is the recursion entry: it gates on the dirty bit and the
//! cached layout inputs, and either reuses the memoized result or runs
//! `layout_node_impl`. The implementation walks each node's children one
//! wrap line at a time: classify and pre-size, resolve flexible children
//! against the remaining space, position along the main then cross axis,
//! distribute wrapped lines, derive intrinsic dimensions, and finalize
//! absolutely positioned children.

use log::trace;

use crate::error::Result;
use crate::layout::geometry::{
    axis_dimension, leading_edge, leading_spacing, trailing_edge, trailing_spacing, Dimension,
    PhysicalEdge,
};
use crate::layout::number::{floats_equal, is_defined, is_undefined, UNDEFINED};
use crate::layout::style::{Align, Direction, FlexDirection, FlexWrap, Justify, PositionType};
use crate::layout::LayoutContext;
use crate::{LayoutTree, NodeKey};

fn resolve_direction(tree: &LayoutTree, key: NodeKey, parent: Option<Direction>) -> Direction {
    let direction = tree.node(key).style.direction;
    if direction == Direction::Inherit {
        parent.unwrap_or(Direction::Ltr)
    } else {
        direction
    }
}

fn leading_margin(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    tree.node(key)
        .style
        .margin
        .get_with_fallback(leading_spacing(axis), leading_edge(axis).into())
}

fn trailing_margin(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    tree.node(key)
        .style
        .margin
        .get_with_fallback(trailing_spacing(axis), trailing_edge(axis).into())
}

fn margin_axis(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    leading_margin(tree, key, axis) + trailing_margin(tree, key, axis)
}

fn leading_padding(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    tree.node(key)
        .style
        .padding
        .get_with_fallback(leading_spacing(axis), leading_edge(axis).into())
}

fn trailing_padding(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    tree.node(key)
        .style
        .padding
        .get_with_fallback(trailing_spacing(axis), trailing_edge(axis).into())
}

fn leading_border(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    tree.node(key)
        .style
        .border
        .get_with_fallback(leading_spacing(axis), leading_edge(axis).into())
}

fn trailing_border(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    tree.node(key)
        .style
        .border
        .get_with_fallback(trailing_spacing(axis), trailing_edge(axis).into())
}

fn border_axis(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    leading_border(tree, key, axis) + trailing_border(tree, key, axis)
}

fn leading_padding_and_border(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    leading_padding(tree, key, axis) + leading_border(tree, key, axis)
}

fn trailing_padding_and_border(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    trailing_padding(tree, key, axis) + trailing_border(tree, key, axis)
}

fn padding_and_border_axis(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    leading_padding_and_border(tree, key, axis) + trailing_padding_and_border(tree, key, axis)
}

/// Clamp a candidate size into the node's min/max bounds for the axis.
/// The max bound is applied first; a min bound larger than the max wins.
fn bound_axis(tree: &LayoutTree, key: NodeKey, axis: FlexDirection, value: f32) -> f32 {
    let dim = axis_dimension(axis);
    let min = tree.node(key).style.min_dimension(dim);
    let max = tree.node(key).style.max_dimension(dim);
    let mut bound = value;
    if is_defined(max) && max >= 0.0 && bound > max {
        bound = max;
    }
    if is_defined(min) && min >= 0.0 && bound < min {
        bound = min;
    }
    bound
}

/// A style dimension constrains layout only when defined and non-negative.
fn is_dim_defined(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> bool {
    let value = tree.node(key).style.dimension(axis_dimension(axis));
    is_defined(value) && value >= 0.0
}

fn is_layout_dim_defined(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> bool {
    is_defined(tree.node(key).layout.dimension(axis_dimension(axis)))
}

fn layout_dim(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    tree.node(key).layout.dimension(axis_dimension(axis))
}

fn is_pos_defined(tree: &LayoutTree, key: NodeKey, edge: PhysicalEdge) -> bool {
    is_defined(tree.node(key).style.position.get(edge))
}

fn position_or_zero(tree: &LayoutTree, key: NodeKey, edge: PhysicalEdge) -> f32 {
    let value = tree.node(key).style.position.get(edge);
    if is_defined(value) {
        value
    } else {
        0.0
    }
}

/// The offset a relatively positioned node applies to itself: the leading
/// offset when set, otherwise minus the trailing one.
fn relative_position(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    let lead = tree.node(key).style.position.get(leading_edge(axis));
    if is_defined(lead) {
        lead
    } else {
        -position_or_zero(tree, key, trailing_edge(axis))
    }
}

fn dim_with_margin(tree: &LayoutTree, key: NodeKey, axis: FlexDirection) -> f32 {
    layout_dim(tree, key, axis) + margin_axis(tree, key, axis)
}

/// Effective cross alignment: the child's `align_self` unless it defers.
fn child_align(tree: &LayoutTree, parent: NodeKey, child: NodeKey) -> Align {
    let align = tree.node(child).style.align_self;
    if align == Align::Auto {
        tree.node(parent).style.align_items
    } else {
        align
    }
}

/// Only relatively positioned children with a positive flex factor take part
/// in free-space distribution.
fn is_flex(tree: &LayoutTree, key: NodeKey) -> bool {
    let style = &tree.node(key).style;
    style.position_type == PositionType::Relative && style.flex > 0.0
}

impl LayoutTree {
    /// Recursion entry: reuse the cached result when nothing relevant
    /// changed, otherwise recompute and refresh the cache. Every visited
    /// node is left in `HasNewLayout`.
    pub(crate) fn layout_node(
        &mut self,
        ctx: &mut LayoutContext,
        key: NodeKey,
        parent_max_width: f32,
        parent_direction: Option<Direction>,
    ) -> Result<()> {
        // Callers may pre-write constraints into the layout dimensions, so
        // the cache key covers them alongside the width bound.
        let needs_relayout = self.is_dirty(key)
            || !floats_equal(self.cached(key).requested_width, self.layout(key).width())
            || !floats_equal(self.cached(key).requested_height, self.layout(key).height())
            || !floats_equal(self.cached(key).parent_max_width, parent_max_width);

        if needs_relayout {
            let requested_width = self.layout(key).width();
            let requested_height = self.layout(key).height();
            {
                let cached = self.cached_mut(key);
                cached.requested_width = requested_width;
                cached.requested_height = requested_height;
                cached.parent_max_width = parent_max_width;
            }
            self.layout_node_impl(ctx, key, parent_max_width, parent_direction)?;
            let result = self.layout(key).clone();
            self.cached_mut(key).result = result;
        } else {
            trace!("layout cache hit for {:?}", key);
            let result = self.cached(key).result.clone();
            self.layout_mut(key).copy_result_from(&result);
        }

        self.mark_has_new_layout(key);
        Ok(())
    }

    /// Write the style dimension into the layout slot when the style pins
    /// the axis and nothing else set it yet.
    fn set_dimension_from_style(&mut self, key: NodeKey, axis: FlexDirection) {
        let dim = axis_dimension(axis);
        if is_defined(self.layout(key).dimension(dim)) || !is_dim_defined(self, key, axis) {
            return;
        }
        let value = f32::max(
            bound_axis(self, key, axis, self.node(key).style.dimension(dim)),
            padding_and_border_axis(self, key, axis),
        );
        self.layout_mut(key).set_dimension(dim, value);
    }

    /// Pin `child`'s trailing edge so that leading + size + trailing spans
    /// the parent's dimension on the axis.
    fn set_trailing_position(&mut self, parent: NodeKey, child: NodeKey, axis: FlexDirection) {
        let value = layout_dim(self, parent, axis)
            - layout_dim(self, child, axis)
            - self.layout(child).position(leading_edge(axis));
        self.layout_mut(child).set_position(trailing_edge(axis), value);
    }

    fn layout_node_impl(
        &mut self,
        ctx: &mut LayoutContext,
        key: NodeKey,
        parent_max_width: f32,
        parent_direction: Option<Direction>,
    ) -> Result<()> {
        let children: Vec<NodeKey> = self.node(key).children.clone();
        let child_count = children.len();
        for &child in &children {
            self.layout_mut(child).reset_result();
        }

        let direction = resolve_direction(self, key, parent_direction);
        let main_axis = self.node(key).style.flex_direction.resolve(direction);
        let cross_axis = main_axis.cross(direction);
        let resolved_row_axis = FlexDirection::Row.resolve(direction);

        self.set_dimension_from_style(key, main_axis);
        self.set_dimension_from_style(key, cross_axis);

        self.layout_mut(key).direction = direction;

        // The parent placed this node; complete both axes with the delta of
        // margin plus relative offset. The parent's positioning phase
        // absorbs this when it accumulates child offsets.
        let delta = leading_margin(self, key, main_axis) + relative_position(self, key, main_axis);
        self.layout_mut(key).add_position(leading_edge(main_axis), delta);
        let delta = trailing_margin(self, key, main_axis) + relative_position(self, key, main_axis);
        self.layout_mut(key).add_position(trailing_edge(main_axis), delta);
        let delta = leading_margin(self, key, cross_axis) + relative_position(self, key, cross_axis);
        self.layout_mut(key).add_position(leading_edge(cross_axis), delta);
        let delta = trailing_margin(self, key, cross_axis) + relative_position(self, key, cross_axis);
        self.layout_mut(key).add_position(trailing_edge(cross_axis), delta);

        let padding_and_border_axis_resolved_row = padding_and_border_axis(self, key, resolved_row_axis);
        let padding_and_border_axis_column = padding_and_border_axis(self, key, FlexDirection::Column);

        if self.is_measure_defined(key) {
            let is_resolved_row_dim_defined = is_layout_dim_defined(self, key, resolved_row_axis);

            let mut width = if is_dim_defined(self, key, resolved_row_axis) {
                self.node(key).style.width
            } else if is_resolved_row_dim_defined {
                layout_dim(self, key, resolved_row_axis)
            } else {
                parent_max_width - margin_axis(self, key, resolved_row_axis)
            };
            width -= padding_and_border_axis_resolved_row;

            // Only measure while a dimension is still unknown; style or a
            // flex parent may already have settled both.
            let is_row_undefined =
                !is_dim_defined(self, key, resolved_row_axis) && !is_resolved_row_dim_defined;
            let is_column_undefined = !is_dim_defined(self, key, FlexDirection::Column)
                && is_undefined(self.layout(key).dimension(Dimension::Height));
            if is_row_undefined || is_column_undefined {
                self.invoke_measure(ctx, key, width)?;
                if is_row_undefined {
                    let measured = ctx.measure_output.width + padding_and_border_axis_resolved_row;
                    self.layout_mut(key).set_dimension(Dimension::Width, measured);
                }
                if is_column_undefined {
                    let measured = ctx.measure_output.height + padding_and_border_axis_column;
                    self.layout_mut(key).set_dimension(Dimension::Height, measured);
                }
            }
            if child_count == 0 {
                return Ok(());
            }
        }

        let is_node_flex_wrap = self.node(key).style.flex_wrap == FlexWrap::Wrap;
        let justify_content = self.node(key).style.justify_content;

        let leading_padding_and_border_main = leading_padding_and_border(self, key, main_axis);
        let leading_padding_and_border_cross = leading_padding_and_border(self, key, cross_axis);
        let padding_and_border_axis_main = padding_and_border_axis(self, key, main_axis);
        let padding_and_border_axis_cross = padding_and_border_axis(self, key, cross_axis);

        let is_main_dim_defined = is_layout_dim_defined(self, key, main_axis);
        let is_cross_dim_defined = is_layout_dim_defined(self, key, cross_axis);
        let is_main_row_direction = main_axis.is_row();

        let mut defined_main_dim = UNDEFINED;
        if is_main_dim_defined {
            defined_main_dim = layout_dim(self, key, main_axis) - padding_and_border_axis_main;
        }

        // Absolutely positioned children found while scanning lines; their
        // final pass runs once the container dimensions are settled.
        let mut absolute_children: Vec<NodeKey> = Vec::new();

        let mut start_line = 0usize;
        let mut end_line = 0usize;
        // Set when a wrap break already laid out the first child of the next
        // line, so the next scan must not lay it out again.
        let mut already_computed_next_layout = false;
        let mut lines_cross_dim = 0.0f32;
        let mut lines_main_dim = 0.0f32;
        let mut lines_count = 0usize;

        while end_line < child_count {
            // Scan the line: classify children, recurse into the fixed-size
            // ones, and accumulate the space the line cannot give up.
            let mut main_content_dim = 0.0f32;

            let mut flexible_children_count: i32 = 0;
            let mut total_flexible = 0.0f32;
            let mut non_flexible_children_count: i32 = 0;

            // While children keep simple stacking behaviour, position them
            // right here in the scan; the dedicated positioning passes below
            // then skip everything before the first complex child.
            let mut is_simple_stack_main = (is_main_dim_defined
                && justify_content == Justify::FlexStart)
                || (!is_main_dim_defined && justify_content != Justify::Center);
            let mut first_complex_main = if is_simple_stack_main { child_count } else { start_line };

            let mut is_simple_stack_cross = true;
            let mut first_complex_cross = child_count;

            let mut flex_children: Vec<NodeKey> = Vec::new();

            let mut main_dim = leading_padding_and_border_main;
            let mut cross_dim = 0.0f32;

            let mut i = start_line;
            while i < child_count {
                let child = children[i];
                self.layout_mut(child).line_index = lines_count;

                let align_item = child_align(self, key, child);

                // Pre-fill the cross dimension of stretched children before
                // the recursive pass so they lay out at their final size.
                if align_item == Align::Stretch
                    && self.node(child).style.position_type == PositionType::Relative
                    && is_cross_dim_defined
                    && !is_dim_defined(self, child, cross_axis)
                {
                    let bounded = bound_axis(
                        self,
                        child,
                        cross_axis,
                        layout_dim(self, key, cross_axis)
                            - padding_and_border_axis_cross
                            - margin_axis(self, child, cross_axis),
                    );
                    // Never smaller than the child's own padding and border.
                    let value = f32::max(bounded, padding_and_border_axis(self, child, cross_axis));
                    self.layout_mut(child).set_dimension(axis_dimension(cross_axis), value);
                } else if self.node(child).style.position_type == PositionType::Absolute {
                    absolute_children.push(child);

                    // Both offsets on an axis pin the child's size as long as
                    // this container's dimension is known.
                    for axis in [FlexDirection::Column, FlexDirection::Row] {
                        if is_layout_dim_defined(self, key, axis)
                            && !is_dim_defined(self, child, axis)
                            && is_pos_defined(self, child, leading_edge(axis))
                            && is_pos_defined(self, child, trailing_edge(axis))
                        {
                            let bounded = bound_axis(
                                self,
                                child,
                                axis,
                                layout_dim(self, key, axis)
                                    - padding_and_border_axis(self, key, axis)
                                    - margin_axis(self, child, axis)
                                    - position_or_zero(self, child, leading_edge(axis))
                                    - position_or_zero(self, child, trailing_edge(axis)),
                            );
                            let value =
                                f32::max(bounded, padding_and_border_axis(self, child, axis));
                            self.layout_mut(child).set_dimension(axis_dimension(axis), value);
                        }
                    }
                }

                let mut next_content_dim = 0.0f32;

                // A child is only flexible once this container has a known
                // main dimension to distribute.
                if is_main_dim_defined && is_flex(self, child) {
                    flexible_children_count += 1;
                    total_flexible += self.node(child).style.flex;
                    flex_children.push(child);

                    // Size still unknown, but padding, border and margin are
                    // not: that minimum footprint already claims space.
                    next_content_dim = padding_and_border_axis(self, child, main_axis)
                        + margin_axis(self, child, main_axis);
                } else {
                    let mut max_width = UNDEFINED;
                    if !is_main_row_direction {
                        if is_dim_defined(self, key, resolved_row_axis) {
                            max_width = layout_dim(self, key, resolved_row_axis)
                                - padding_and_border_axis_resolved_row;
                        } else {
                            max_width = parent_max_width
                                - margin_axis(self, key, resolved_row_axis)
                                - padding_and_border_axis_resolved_row;
                        }
                    }

                    // The main recursive call: fixed and content-sized
                    // children know everything they need already.
                    if !already_computed_next_layout {
                        self.layout_node(ctx, child, max_width, Some(direction))?;
                    }

                    // Absolute children take no space in the flow.
                    if self.node(child).style.position_type == PositionType::Relative {
                        non_flexible_children_count += 1;
                        next_content_dim = dim_with_margin(self, child, main_axis);
                    }
                }

                // This child would overflow the line; wrap it to the next
                // one, unless it is alone on this line.
                if is_node_flex_wrap
                    && is_main_dim_defined
                    && main_content_dim + next_content_dim > defined_main_dim
                    && i != start_line
                {
                    trace!("wrapping line {} of {:?} before child {:?}", lines_count, key, child);
                    non_flexible_children_count -= 1;
                    already_computed_next_layout = true;
                    break;
                }

                if is_simple_stack_main
                    && (self.node(child).style.position_type != PositionType::Relative
                        || is_flex(self, child))
                {
                    is_simple_stack_main = false;
                    first_complex_main = i;
                }

                if is_simple_stack_cross
                    && (self.node(child).style.position_type != PositionType::Relative
                        || (align_item != Align::Stretch && align_item != Align::FlexStart)
                        || (align_item == Align::Stretch && !is_cross_dim_defined)
                        || is_undefined(layout_dim(self, child, cross_axis)))
                {
                    is_simple_stack_cross = false;
                    first_complex_cross = i;
                }

                if is_simple_stack_main {
                    self.layout_mut(child).add_position(leading_edge(main_axis), main_dim);
                    if is_main_dim_defined {
                        self.set_trailing_position(key, child, main_axis);
                    }

                    main_dim += dim_with_margin(self, child, main_axis);
                    cross_dim = f32::max(
                        cross_dim,
                        bound_axis(self, child, cross_axis, dim_with_margin(self, child, cross_axis)),
                    );
                }

                if is_simple_stack_cross {
                    self.layout_mut(child).add_position(
                        leading_edge(cross_axis),
                        lines_cross_dim + leading_padding_and_border_cross,
                    );
                    if is_cross_dim_defined {
                        self.set_trailing_position(key, child, cross_axis);
                    }
                }

                already_computed_next_layout = false;
                main_content_dim += next_content_dim;
                end_line = i + 1;
                i += 1;
            }

            // Distribute the remaining main-axis space: to flexible children
            // when there are any, through justify-content otherwise.
            let mut leading_main_dim = 0.0f32;
            let mut between_main_dim = 0.0f32;

            let mut remaining_main_dim = if is_main_dim_defined {
                defined_main_dim - main_content_dim
            } else {
                f32::max(main_content_dim, 0.0) - main_content_dim
            };

            if flexible_children_count != 0 {
                let mut flexible_main_dim = remaining_main_dim / total_flexible;

                // Children whose flex share violates their min/max bounds
                // are fixed at the bound and leave the distribution.
                for &flex_child in &flex_children {
                    let base_main_dim = flexible_main_dim * self.node(flex_child).style.flex
                        + padding_and_border_axis(self, flex_child, main_axis);
                    let bound_main_dim = bound_axis(self, flex_child, main_axis, base_main_dim);
                    if base_main_dim != bound_main_dim {
                        remaining_main_dim -= bound_main_dim;
                        total_flexible -= self.node(flex_child).style.flex;
                    }
                }
                flexible_main_dim = remaining_main_dim / total_flexible;

                // Overflowing fixed content leaves nothing to hand out.
                if flexible_main_dim < 0.0 {
                    flexible_main_dim = 0.0;
                }

                // Commit each child's final main size and recurse.
                for &flex_child in &flex_children {
                    let value = bound_axis(
                        self,
                        flex_child,
                        main_axis,
                        flexible_main_dim * self.node(flex_child).style.flex
                            + padding_and_border_axis(self, flex_child, main_axis),
                    );
                    self.layout_mut(flex_child).set_dimension(axis_dimension(main_axis), value);

                    let mut max_width = UNDEFINED;
                    if is_dim_defined(self, key, resolved_row_axis) {
                        max_width = layout_dim(self, key, resolved_row_axis)
                            - padding_and_border_axis_resolved_row;
                    } else if !is_main_row_direction {
                        max_width = parent_max_width
                            - margin_axis(self, key, resolved_row_axis)
                            - padding_and_border_axis_resolved_row;
                    }

                    self.layout_node(ctx, flex_child, max_width, Some(direction))?;
                }
            } else if justify_content != Justify::FlexStart {
                match justify_content {
                    Justify::Center => leading_main_dim = remaining_main_dim / 2.0,
                    Justify::FlexEnd => leading_main_dim = remaining_main_dim,
                    Justify::SpaceBetween => {
                        remaining_main_dim = f32::max(remaining_main_dim, 0.0);
                        let slots = flexible_children_count + non_flexible_children_count - 1;
                        if slots != 0 {
                            between_main_dim = remaining_main_dim / slots as f32;
                        }
                    }
                    Justify::SpaceAround => {
                        // Edge gaps are half of the gap between children.
                        between_main_dim = remaining_main_dim
                            / (flexible_children_count + non_flexible_children_count) as f32;
                        leading_main_dim = between_main_dim / 2.0;
                    }
                    Justify::FlexStart => {}
                }
            }

            // Position along the main axis. The accumulators double as the
            // content extent used for intrinsic sizing below.
            main_dim += leading_main_dim;

            for &child in &children[first_complex_main.min(end_line)..end_line] {
                if self.node(child).style.position_type == PositionType::Absolute
                    && is_pos_defined(self, child, leading_edge(main_axis))
                {
                    // An explicit leading offset overrides the accumulated
                    // flow position: offset from the parent's border box.
                    let value = position_or_zero(self, child, leading_edge(main_axis))
                        + leading_border(self, key, main_axis)
                        + leading_margin(self, child, main_axis);
                    self.layout_mut(child).set_position(leading_edge(main_axis), value);
                } else {
                    self.layout_mut(child).add_position(leading_edge(main_axis), main_dim);

                    if is_main_dim_defined {
                        self.set_trailing_position(key, child, main_axis);
                    }

                    // Only relative children advance the flow.
                    if self.node(child).style.position_type == PositionType::Relative {
                        main_dim += between_main_dim + dim_with_margin(self, child, main_axis);
                        cross_dim = f32::max(
                            cross_dim,
                            bound_axis(
                                self,
                                child,
                                cross_axis,
                                dim_with_margin(self, child, cross_axis),
                            ),
                        );
                    }
                }
            }

            let mut container_cross_axis = layout_dim(self, key, cross_axis);
            if !is_cross_dim_defined {
                // Both sides are added at the end here: the aggregate runs
                // through max and intermediate negatives would poison it.
                container_cross_axis = f32::max(
                    bound_axis(self, key, cross_axis, cross_dim + padding_and_border_axis_cross),
                    padding_and_border_axis_cross,
                );
            }

            // Position along the cross axis.
            for &child in &children[first_complex_cross.min(end_line)..end_line] {
                if self.node(child).style.position_type == PositionType::Absolute
                    && is_pos_defined(self, child, leading_edge(cross_axis))
                {
                    let value = position_or_zero(self, child, leading_edge(cross_axis))
                        + leading_border(self, key, cross_axis)
                        + leading_margin(self, child, cross_axis);
                    self.layout_mut(child).set_position(leading_edge(cross_axis), value);
                } else {
                    let mut leading_cross_dim = leading_padding_and_border_cross;

                    if self.node(child).style.position_type == PositionType::Relative {
                        let align_item = child_align(self, key, child);
                        if align_item == Align::Stretch {
                            // Stretch only fills a dimension nothing else
                            // (style or the pre-fill above) already set.
                            if is_undefined(layout_dim(self, child, cross_axis)) {
                                let bounded = bound_axis(
                                    self,
                                    child,
                                    cross_axis,
                                    container_cross_axis
                                        - padding_and_border_axis_cross
                                        - margin_axis(self, child, cross_axis),
                                );
                                let value = f32::max(
                                    bounded,
                                    padding_and_border_axis(self, child, cross_axis),
                                );
                                self.layout_mut(child)
                                    .set_dimension(axis_dimension(cross_axis), value);
                            }
                        } else if align_item != Align::FlexStart {
                            let remaining_cross_dim = container_cross_axis
                                - padding_and_border_axis_cross
                                - dim_with_margin(self, child, cross_axis);
                            if align_item == Align::Center {
                                leading_cross_dim += remaining_cross_dim / 2.0;
                            } else {
                                leading_cross_dim += remaining_cross_dim;
                            }
                        }
                    }

                    self.layout_mut(child)
                        .add_position(leading_edge(cross_axis), lines_cross_dim + leading_cross_dim);

                    if is_cross_dim_defined {
                        self.set_trailing_position(key, child, cross_axis);
                    }
                }
            }

            lines_cross_dim += cross_dim;
            lines_main_dim = f32::max(lines_main_dim, main_dim);
            lines_count += 1;
            start_line = end_line;
        }

        // More than one line: distribute the lines along the cross axis
        // according to align-content, then re-align each line's children.
        if lines_count > 1 && is_cross_dim_defined {
            let node_cross_axis_inner_size =
                layout_dim(self, key, cross_axis) - padding_and_border_axis_cross;
            let remaining_align_content_dim = node_cross_axis_inner_size - lines_cross_dim;

            let mut cross_dim_lead = 0.0f32;
            let mut current_lead = leading_padding_and_border_cross;

            match self.node(key).style.align_content {
                Align::FlexEnd => current_lead += remaining_align_content_dim,
                Align::Center => current_lead += remaining_align_content_dim / 2.0,
                Align::Stretch => {
                    if node_cross_axis_inner_size > lines_cross_dim {
                        cross_dim_lead = remaining_align_content_dim / lines_count as f32;
                    }
                }
                Align::FlexStart | Align::Auto => {}
            }

            let mut end_index = 0usize;
            for line in 0..lines_count {
                let start_index = end_index;

                // The tallest relative child carries the line.
                let mut line_height = 0.0f32;
                let mut scan = start_index;
                while scan < child_count {
                    let child = children[scan];
                    if self.node(child).style.position_type != PositionType::Relative {
                        scan += 1;
                        continue;
                    }
                    if self.layout(child).line_index != line {
                        break;
                    }
                    if is_defined(layout_dim(self, child, cross_axis)) {
                        line_height = f32::max(
                            line_height,
                            layout_dim(self, child, cross_axis)
                                + margin_axis(self, child, cross_axis),
                        );
                    }
                    scan += 1;
                }
                end_index = scan;
                line_height += cross_dim_lead;

                for &child in &children[start_index..end_index] {
                    if self.node(child).style.position_type != PositionType::Relative {
                        continue;
                    }

                    match child_align(self, key, child) {
                        Align::FlexStart => {
                            let value = current_lead + leading_margin(self, child, cross_axis);
                            self.layout_mut(child).set_position(leading_edge(cross_axis), value);
                        }
                        Align::FlexEnd => {
                            let value = current_lead + line_height
                                - trailing_margin(self, child, cross_axis)
                                - layout_dim(self, child, cross_axis);
                            self.layout_mut(child).set_position(leading_edge(cross_axis), value);
                        }
                        Align::Center => {
                            let child_cross = layout_dim(self, child, cross_axis);
                            let value = current_lead + (line_height - child_cross) / 2.0;
                            self.layout_mut(child).set_position(leading_edge(cross_axis), value);
                        }
                        Align::Stretch => {
                            let value = current_lead + leading_margin(self, child, cross_axis);
                            self.layout_mut(child).set_position(leading_edge(cross_axis), value);
                            // TODO: size stretched children whose cross
                            // dimension is still auto here; on wrapped
                            // non-row layouts they currently keep the
                            // undefined sentinel.
                        }
                        Align::Auto => {}
                    }
                }

                current_lead += line_height;
            }
        }

        let mut needs_main_trailing_pos = false;
        let mut needs_cross_trailing_pos = false;

        // Nothing sized this container on an axis: derive it from content.
        if !is_main_dim_defined {
            let value = f32::max(
                // The trailing padding is still missing from the content
                // extent at this point.
                bound_axis(
                    self,
                    key,
                    main_axis,
                    lines_main_dim + trailing_padding_and_border(self, key, main_axis),
                ),
                padding_and_border_axis_main,
            );
            self.layout_mut(key).set_dimension(axis_dimension(main_axis), value);

            if main_axis == FlexDirection::RowReverse || main_axis == FlexDirection::ColumnReverse {
                needs_main_trailing_pos = true;
            }
        }

        if !is_cross_dim_defined {
            let value = f32::max(
                bound_axis(self, key, cross_axis, lines_cross_dim + padding_and_border_axis_cross),
                padding_and_border_axis_cross,
            );
            self.layout_mut(key).set_dimension(axis_dimension(cross_axis), value);

            if cross_axis == FlexDirection::RowReverse || cross_axis == FlexDirection::ColumnReverse
            {
                needs_cross_trailing_pos = true;
            }
        }

        // Reverse axes resolve their leading edge against the container
        // size, which only just became known: backfill trailing positions.
        if needs_main_trailing_pos || needs_cross_trailing_pos {
            for &child in &children {
                if needs_main_trailing_pos {
                    self.set_trailing_position(key, child, main_axis);
                }
                if needs_cross_trailing_pos {
                    self.set_trailing_position(key, child, cross_axis);
                }
            }
        }

        // Finalize absolutely positioned children now both container
        // dimensions are settled.
        for &abs_child in &absolute_children {
            for axis in [FlexDirection::Column, FlexDirection::Row] {
                if is_layout_dim_defined(self, key, axis)
                    && !is_dim_defined(self, abs_child, axis)
                    && is_pos_defined(self, abs_child, leading_edge(axis))
                    && is_pos_defined(self, abs_child, trailing_edge(axis))
                {
                    let bounded = bound_axis(
                        self,
                        abs_child,
                        axis,
                        layout_dim(self, key, axis)
                            - border_axis(self, key, axis)
                            - margin_axis(self, abs_child, axis)
                            - position_or_zero(self, abs_child, leading_edge(axis))
                            - position_or_zero(self, abs_child, trailing_edge(axis)),
                    );
                    let value = f32::max(bounded, padding_and_border_axis(self, abs_child, axis));
                    self.layout_mut(abs_child).set_dimension(axis_dimension(axis), value);
                }

                // An offset only on the trailing side fixes the leading
                // position once the child's size is known.
                if is_pos_defined(self, abs_child, trailing_edge(axis))
                    && !is_pos_defined(self, abs_child, leading_edge(axis))
                {
                    let value = layout_dim(self, key, axis)
                        - layout_dim(self, abs_child, axis)
                        - position_or_zero(self, abs_child, trailing_edge(axis));
                    self.layout_mut(abs_child).set_position(leading_edge(axis), value);
                }
            }
        }

        Ok(())
    }
}
