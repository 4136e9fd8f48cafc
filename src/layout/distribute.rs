//! Free-space distribution and hug extents.
//!
//! # Algorithm
//!
//! For a container with main axis `m` and available main size `M`:
//!
//! 1. **Fixed** children take their clamped pixel size
//! 2. **Percent** children (and main-axis fill, as 100%) resolve against `M`
//! 3. **Hug** children report their natural size, offered `M`
//! 4. Gaps: one per adjacent pair
//! 5. `free = max(0, M - fixed - percent - hug - gaps)`, 0 when `M` is unknown
//! 6. **Flexible** children split `free` by weight; their configured min
//!    never pushes them above their share
//! 7. Children are placed from 0, advancing by `size + gap`
//!
//! A hug container measures itself with the same pass: its flow-axis extent
//! is the sum of sizes and gaps, its cross extent the largest
//! self-determined child. Children that depend on the container's size
//! (percent, fill, grow) count as their clamped zero on the cross axis.
//! A hugging node measures its content inside its own extent: percent and
//! fill resolve against the offered space, flow children use their slot.

use taffy::geometry::Size;

use crate::engine::BoxConfig;
use crate::error::{LayoutError, Result};
use crate::types::{AlongAxis, Align, Axis, Bounds, Measure, SizeSpec, padding_sum};

use super::constraint;
use super::measurement;
use super::resolver::{Link, Resolver, split};

// =============================================================================
// Pure distribution
// =============================================================================

/// How a flow child claims main-axis space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowBasis {
    Fixed(f32),
    Percent(f32),
    /// Natural size, already measured.
    Hug(f32),
    /// Weighted share of free space.
    Flexible(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowItem {
    pub basis: FlowBasis,
    pub bounds: Option<Bounds>,
}

/// Placement of one child along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlowSlot {
    pub offset: f32,
    pub size: f32,
}

/// Result of one distribution pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlowLayout {
    /// One slot per item, in input order.
    pub slots: Vec<FlowSlot>,
    /// Sizes plus gaps, without a trailing gap.
    pub main_extent: f32,
}

impl FlowLayout {
    /// The slot of the flow child stored under `key` in `container`.
    pub fn slot_for(&self, container: &BoxConfig, key: &str) -> Option<FlowSlot> {
        let index = container
            .flow_children()
            .iter()
            .position(|(child_key, _)| *child_key == key)?;
        self.slots.get(index).copied()
    }
}

/// Distribute `main` along the axis among `items`.
///
/// `main` is `None` when the container has no known size: percent items
/// then fail and flexible items get nothing.
pub fn distribute(
    items: &[FlowItem],
    main: Option<f32>,
    gap: f32,
    axis: Axis,
) -> Result<FlowLayout> {
    let mut sizes = vec![0.0; items.len()];
    let mut claimed = 0.0;
    let mut total_weight = 0.0;

    for (size, item) in sizes.iter_mut().zip(items) {
        let base = match item.basis {
            FlowBasis::Fixed(v) | FlowBasis::Hug(v) => v,
            FlowBasis::Percent(p) => measurement::resolve(Measure::Percent(p), main, axis)?,
            FlowBasis::Flexible(weight) => {
                total_weight += weight;
                continue;
            }
        };
        *size = constraint::apply(base, item.bounds);
        claimed += *size;
    }

    let gaps = if items.len() > 1 {
        (items.len() - 1) as f32 * gap
    } else {
        0.0
    };
    let free = main.map_or(0.0, |main| (main - claimed - gaps).max(0.0));

    for (size, item) in sizes.iter_mut().zip(items) {
        if let FlowBasis::Flexible(weight) = item.basis {
            let share = if total_weight > 0.0 {
                free * weight / total_weight
            } else {
                0.0
            };
            *size = constraint::flexible(share, item.bounds);
        }
    }

    log::trace!(
        "distribute {axis}: main={main:?} claimed={claimed} gaps={gaps} free={free} weight={total_weight}"
    );

    let mut slots = Vec::with_capacity(items.len());
    let mut cursor = 0.0;
    for size in sizes {
        slots.push(FlowSlot { offset: cursor, size });
        cursor += size + gap;
    }
    let main_extent = slots.last().map_or(0.0, |last| last.offset + last.size);

    Ok(FlowLayout { slots, main_extent })
}

// =============================================================================
// Resolver integration
// =============================================================================

/// Outer size of `node` on each axis where it follows from `available`
/// alone: pixels, percent, fill and grow. Hug keeps `available`.
pub(super) fn own_extent(node: &BoxConfig, available: Size<Option<f32>>) -> Size<Option<f32>> {
    let own_along = |axis: Axis| {
        let space = available.along(axis);
        let base = if !node.absolute() && node.align(axis) == Align::Fill {
            space
        } else {
            match node.size_spec(axis) {
                SizeSpec::Px(v) => Some(v),
                SizeSpec::Percent(p) => space.map(|space| space * p),
                SizeSpec::Grow(_) => space,
                SizeSpec::Hug => return space,
            }
        };
        base.map(|v| constraint::apply(v, node.constraint(axis)))
    };
    Size {
        width: own_along(Axis::X),
        height: own_along(Axis::Y),
    }
}

/// Shrink a node's outer size to the space inside its padding.
fn inner_of(node: &BoxConfig, outer: Size<Option<f32>>) -> Size<Option<f32>> {
    let inner_along = |axis: Axis| {
        let padding = padding_sum(&node.padding(), axis);
        outer.along(axis).map(|space| (space - padding).max(0.0))
    };
    Size {
        width: inner_along(Axis::X),
        height: inner_along(Axis::Y),
    }
}

impl Resolver<'_> {
    /// Lay out the flow children of the container at the end of `lineage`.
    pub fn flow_layout(&self, lineage: &[Link<'_>], axis: Axis) -> Result<FlowLayout> {
        let (container, _) = split(lineage);
        let config = container.config;

        let main = self.offered(lineage, axis)?;
        let needs_cross = config
            .flow_children()
            .iter()
            .any(|(_, child)| flow_spec(child, axis) == SizeSpec::Hug);
        let cross = if needs_cross {
            self.offered(lineage, axis.cross())?
        } else {
            None
        };

        let mut available: Size<Option<f32>> = Size { width: None, height: None };
        available.set_along(axis, main);
        available.set_along(axis.cross(), cross);
        self.flow_layout_with(config, axis, available)
    }

    /// Flow layout of `container` given its inner available space.
    pub(crate) fn flow_layout_with(
        &self,
        container: &BoxConfig,
        axis: Axis,
        available: Size<Option<f32>>,
    ) -> Result<FlowLayout> {
        let mut items = Vec::new();
        for (_, child) in container.flow_children() {
            let basis = match flow_spec(child, axis) {
                SizeSpec::Px(v) => FlowBasis::Fixed(v),
                SizeSpec::Percent(p) => FlowBasis::Percent(p),
                SizeSpec::Hug => FlowBasis::Hug(self.hug_extent(child, axis, available)?),
                SizeSpec::Grow(weight) => FlowBasis::Flexible(weight),
            };
            items.push(FlowItem {
                basis,
                bounds: child.constraint(axis),
            });
        }
        distribute(&items, available.along(axis), container.gap(), axis)
    }

    /// Natural size of `node` on `axis`, given the space its parent offers.
    ///
    /// Children and content both count; the larger wins. Padding is added
    /// on top.
    pub fn hug_extent(
        &self,
        node: &BoxConfig,
        axis: Axis,
        available: Size<Option<f32>>,
    ) -> Result<f32> {
        self.hug_extent_within(node, axis, own_extent(node, available))
    }

    /// [`hug_extent`](Self::hug_extent) once the node's outer size on each
    /// axis is as known as it gets.
    pub(crate) fn hug_extent_within(
        &self,
        node: &BoxConfig,
        axis: Axis,
        outer: Size<Option<f32>>,
    ) -> Result<f32> {
        let inner = inner_of(node, outer);

        let children = if !node.has_children() {
            0.0
        } else if node.direction().flow_axis() == axis {
            self.flow_layout_with(node, axis, inner)?.main_extent
        } else {
            self.cross_extent(node, axis, inner)?
        };

        let content = node
            .content()
            .map_or(0.0, |content| self.measurer.measure(content, axis, inner));

        Ok(children.max(content) + padding_sum(&node.padding(), axis))
    }

    /// Largest self-determined cross size among the flow children.
    ///
    /// Hug children are measured inside their flow slot.
    fn cross_extent(&self, node: &BoxConfig, axis: Axis, inner: Size<Option<f32>>) -> Result<f32> {
        let flow = axis.cross();
        let needs_slots = node
            .flow_children()
            .iter()
            .any(|(_, child)| {
                child.align(axis) != Align::Fill && child.size_spec(axis) == SizeSpec::Hug
            });
        let layout = if needs_slots {
            match self.flow_layout_with(node, flow, inner) {
                Ok(layout) => layout,
                // Unknown flow extent: measure in the offered space instead.
                Err(LayoutError::MissingParentDimension { .. }) => FlowLayout::default(),
                Err(err) => return Err(err),
            }
        } else {
            FlowLayout::default()
        };

        let mut extent: f32 = 0.0;
        for (index, (_, child)) in node.flow_children().into_iter().enumerate() {
            let natural = if child.align(axis) == Align::Fill {
                0.0
            } else {
                match child.size_spec(axis) {
                    SizeSpec::Px(v) => v,
                    SizeSpec::Hug => {
                        let mut outer = own_extent(child, inner);
                        if let Some(slot) = layout.slots.get(index) {
                            outer.set_along(flow, Some(slot.size));
                        }
                        self.hug_extent_within(child, axis, outer)?
                    }
                    SizeSpec::Percent(_) | SizeSpec::Grow(_) => 0.0,
                }
            };
            extent = extent.max(constraint::apply(natural, child.constraint(axis)));
        }
        Ok(extent)
    }
}

/// Main-axis size spec of a flow child: `align: fill` counts as 100%.
fn flow_spec(child: &BoxConfig, axis: Axis) -> SizeSpec {
    if child.align(axis) == Align::Fill {
        SizeSpec::Percent(1.0)
    } else {
        child.size_spec(axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(basis: FlowBasis) -> FlowItem {
        FlowItem { basis, bounds: None }
    }

    fn sizes(layout: &FlowLayout) -> Vec<f32> {
        layout.slots.iter().map(|slot| slot.size).collect()
    }

    #[test]
    fn test_fixed_items_stack() {
        let items = [item(FlowBasis::Fixed(10.0)), item(FlowBasis::Fixed(10.0))];
        let layout = distribute(&items, Some(100.0), 0.0, Axis::X).unwrap();

        let offsets: Vec<f32> = layout.slots.iter().map(|slot| slot.offset).collect();
        assert_eq!(offsets, vec![0.0, 10.0]);
        assert_eq!(layout.main_extent, 20.0);
    }

    #[test]
    fn test_equal_weights_split_free_space() {
        let items = [
            item(FlowBasis::Fixed(40.0)),
            item(FlowBasis::Percent(0.1)),
            item(FlowBasis::Hug(20.0)),
            item(FlowBasis::Flexible(1.0)),
            item(FlowBasis::Flexible(1.0)),
        ];
        // 300 - 40 - 30 - 20 - 4 * 5 = 190
        let layout = distribute(&items, Some(300.0), 5.0, Axis::X).unwrap();
        assert_eq!(sizes(&layout), vec![40.0, 30.0, 20.0, 95.0, 95.0]);
        assert_eq!(layout.main_extent, 300.0);
    }

    #[test]
    fn test_weighted_shares() {
        let items = [item(FlowBasis::Flexible(1.0)), item(FlowBasis::Flexible(3.0))];
        let layout = distribute(&items, Some(100.0), 0.0, Axis::Y).unwrap();
        assert_eq!(sizes(&layout), vec![25.0, 75.0]);
    }

    #[test]
    fn test_zero_weights_get_nothing() {
        let items = [item(FlowBasis::Flexible(0.0)), item(FlowBasis::Fixed(10.0))];
        let layout = distribute(&items, Some(100.0), 0.0, Axis::X).unwrap();
        assert_eq!(sizes(&layout), vec![0.0, 10.0]);
    }

    #[test]
    fn test_flexible_min_and_max() {
        let items = [
            FlowItem {
                basis: FlowBasis::Flexible(1.0),
                bounds: Some(Bounds::min(80.0)),
            },
            FlowItem {
                basis: FlowBasis::Flexible(1.0),
                bounds: Some(Bounds::max(20.0)),
            },
        ];
        let layout = distribute(&items, Some(100.0), 0.0, Axis::X).unwrap();
        assert_eq!(sizes(&layout), vec![50.0, 20.0]);
    }

    #[test]
    fn test_overflow_leaves_no_free_space() {
        let items = [item(FlowBasis::Fixed(80.0)), item(FlowBasis::Flexible(1.0))];
        let layout = distribute(&items, Some(50.0), 0.0, Axis::X).unwrap();
        assert_eq!(sizes(&layout), vec![80.0, 0.0]);
    }

    #[test]
    fn test_unknown_main() {
        let flexible = [item(FlowBasis::Fixed(10.0)), item(FlowBasis::Flexible(1.0))];
        let layout = distribute(&flexible, None, 2.0, Axis::X).unwrap();
        assert_eq!(sizes(&layout), vec![10.0, 0.0]);
        assert_eq!(layout.main_extent, 12.0);

        let percent = [item(FlowBasis::Percent(0.5))];
        assert_eq!(
            distribute(&percent, None, 0.0, Axis::X),
            Err(LayoutError::MissingParentDimension { axis: Axis::X })
        );
    }

    #[test]
    fn test_own_extent_resolves_parent_relative_sizes() {
        let available = Size {
            width: Some(10.0),
            height: None,
        };

        let mut half = BoxConfig::default();
        half.set_size_spec(Axis::X, SizeSpec::Percent(0.5)).unwrap();
        assert_eq!(own_extent(&half, available).width, Some(5.0));
        assert_eq!(own_extent(&half, available).height, None);

        let mut filled = BoxConfig::default();
        filled.set_align(Axis::X, Align::Fill);
        filled.set_constraint(Axis::X, Some(Bounds::max(8.0))).unwrap();
        assert_eq!(own_extent(&filled, available).width, Some(8.0));
    }

    #[test]
    fn test_empty_flow() {
        let layout = distribute(&[], Some(100.0), 4.0, Axis::X).unwrap();
        assert!(layout.slots.is_empty());
        assert_eq!(layout.main_extent, 0.0);
    }
}
