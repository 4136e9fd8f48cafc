//! BoxConfig - Immutable snapshot of one node.
//!
//! A committed tree is a graph of `Rc<BoxConfig>`: parents own their
//! children, and a mutation copies only the path from the root to the
//! mutated node (`Rc::make_mut`). Everything else stays shared with the
//! previous snapshot, which is what makes [`diff`] cheap.
//!
//! Setters validate their arguments and leave the node untouched on error.

use std::collections::BTreeMap;
use std::rc::Rc;

use taffy::geometry::{Point, Rect, Size};

use crate::error::ConfigError;
use crate::types::{
    AlongAxis, Align, Axis, Bounds, Content, Direction, Measure, Mutation, NO_PADDING, Pivot,
    SizeSpec,
};

/// One node of a committed layout snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxConfig {
    pub(crate) anchor: Point<Measure>,
    pub(crate) size: Size<SizeSpec>,
    pub(crate) pivot: Point<Pivot>,
    pub(crate) align: Point<Align>,
    pub(crate) direction: Direction,
    pub(crate) absolute: bool,
    pub(crate) constrain: Point<Option<Bounds>>,
    pub(crate) gap: f32,
    pub(crate) padding: Rect<f32>,
    pub(crate) order: f32,
    pub(crate) content: Option<Content>,
    pub(crate) children: BTreeMap<String, Rc<BoxConfig>>,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            anchor: Point { x: Measure::Px(0.0), y: Measure::Px(0.0) },
            size: Size { width: SizeSpec::Hug, height: SizeSpec::Hug },
            pivot: Point { x: Pivot::Start, y: Pivot::Start },
            align: Point { x: Align::Start, y: Align::Start },
            direction: Direction::Column,
            absolute: false,
            constrain: Point { x: None, y: None },
            gap: 0.0,
            padding: NO_PADDING,
            order: 0.0,
            content: None,
            children: BTreeMap::new(),
        }
    }
}

impl BoxConfig {
    // =========================================================================
    // Reads
    // =========================================================================

    pub fn anchor(&self, axis: Axis) -> Measure {
        self.anchor.along(axis)
    }

    pub fn size_spec(&self, axis: Axis) -> SizeSpec {
        self.size.along(axis)
    }

    pub fn pivot(&self, axis: Axis) -> Pivot {
        self.pivot.along(axis)
    }

    pub fn align(&self, axis: Axis) -> Align {
        self.align.along(axis)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn absolute(&self) -> bool {
        self.absolute
    }

    pub fn constraint(&self, axis: Axis) -> Option<Bounds> {
        self.constrain.along(axis)
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn padding(&self) -> Rect<f32> {
        self.padding
    }

    pub fn order(&self) -> f32 {
        self.order
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn child(&self, key: &str) -> Option<&Rc<BoxConfig>> {
        self.children.get(key)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Children in flow and paint order: `order` ascending, ties broken by key.
    pub fn ordered_children(&self) -> Vec<(&str, &Rc<BoxConfig>)> {
        // BTreeMap iterates keys ascending; a stable sort on order keeps that
        // as the tie-break.
        let mut children: Vec<(&str, &Rc<BoxConfig>)> = self
            .children
            .iter()
            .map(|(key, child)| (key.as_str(), child))
            .collect();
        // `+ 0.0` folds -0.0 into 0.0 so signed zeros tie.
        children.sort_by(|a, b| (a.1.order + 0.0).total_cmp(&(b.1.order + 0.0)));
        children
    }

    /// Ordered children that take part in the flow (non-absolute).
    pub fn flow_children(&self) -> Vec<(&str, &Rc<BoxConfig>)> {
        let mut children = self.ordered_children();
        children.retain(|(_, child)| !child.absolute);
        children
    }

    // =========================================================================
    // Validated setters
    // =========================================================================

    pub fn set_anchor(&mut self, axis: Axis, anchor: Measure) -> Result<(), ConfigError> {
        let value = match anchor {
            Measure::Px(v) | Measure::Percent(v) => v,
        };
        if !value.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "area anchor",
                reason: format!("{axis} anchor must be finite, got {value}"),
            });
        }
        self.anchor.set_along(axis, anchor);
        Ok(())
    }

    pub fn set_size_spec(&mut self, axis: Axis, spec: SizeSpec) -> Result<(), ConfigError> {
        validate_size(axis, spec)?;
        self.size.set_along(axis, spec);
        Ok(())
    }

    pub fn set_pivot(&mut self, axis: Axis, pivot: Pivot) {
        self.pivot.set_along(axis, pivot);
    }

    pub fn set_align(&mut self, axis: Axis, align: Align) {
        self.align.set_along(axis, align);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn set_absolute(&mut self, absolute: bool) {
        self.absolute = absolute;
    }

    pub fn set_constraint(
        &mut self,
        axis: Axis,
        bounds: Option<Bounds>,
    ) -> Result<(), ConfigError> {
        if let Some(bounds) = bounds {
            validate_bound(axis, "min", bounds.min)?;
            validate_bound(axis, "max", bounds.max)?;
            if bounds.is_contradictory() {
                log::debug!("{axis} constraint has min > max; min wins");
            }
        }
        self.constrain.set_along(axis, bounds);
        Ok(())
    }

    pub fn set_gap(&mut self, gap: f32) -> Result<(), ConfigError> {
        if !gap.is_finite() || gap < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "gap",
                reason: format!("expected a finite non-negative number, got {gap}"),
            });
        }
        self.gap = gap;
        Ok(())
    }

    pub fn set_padding(&mut self, padding: Rect<f32>) -> Result<(), ConfigError> {
        for side in [padding.left, padding.right, padding.top, padding.bottom] {
            if !side.is_finite() || side < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "padding",
                    reason: format!("expected finite non-negative sides, got {side}"),
                });
            }
        }
        self.padding = padding;
        Ok(())
    }

    pub fn set_order(&mut self, order: f32) -> Result<(), ConfigError> {
        if !order.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "order",
                reason: format!("expected a finite number, got {order}"),
            });
        }
        self.order = order;
        Ok(())
    }

    pub fn set_content(&mut self, content: Option<Content>) {
        self.content = content;
    }

    /// Insert an already validated child. Returns false if the key is taken.
    pub(crate) fn insert_child(&mut self, key: &str, child: BoxConfig) -> bool {
        if self.children.contains_key(key) {
            return false;
        }
        self.children.insert(key.to_string(), Rc::new(child));
        true
    }

    pub(crate) fn remove_child(&mut self, key: &str) -> bool {
        self.children.remove(key).is_some()
    }

    /// Walk down `path` with copy-on-write, cloning shared nodes on the way.
    pub(crate) fn descend_mut<'a, S: AsRef<str>>(
        node: &'a mut Rc<BoxConfig>,
        path: &[S],
    ) -> Option<&'a mut BoxConfig> {
        let mut current = Rc::make_mut(node);
        for key in path {
            current = Rc::make_mut(current.children.get_mut(key.as_ref())?);
        }
        Some(current)
    }

    /// Walk down `path` without copying.
    pub(crate) fn descend<'a, S: AsRef<str>>(
        node: &'a Rc<BoxConfig>,
        path: &[S],
    ) -> Option<&'a Rc<BoxConfig>> {
        let mut current = node;
        for key in path {
            current = current.children.get(key.as_ref())?;
        }
        Some(current)
    }
}

fn validate_size(axis: Axis, spec: SizeSpec) -> Result<(), ConfigError> {
    let field = axis.extent_name();
    match spec {
        SizeSpec::Px(v) if !v.is_finite() || v < 0.0 => Err(ConfigError::InvalidValue {
            field,
            reason: format!("pixel size must be finite and non-negative, got {v}"),
        }),
        SizeSpec::Percent(p) if !(0.0..=1.0).contains(&p) => Err(ConfigError::InvalidValue {
            field,
            reason: format!("percent must be within [0, 1], got {p}"),
        }),
        SizeSpec::Grow(w) if !w.is_finite() || w < 0.0 => Err(ConfigError::InvalidValue {
            field,
            reason: format!("grow weight must be finite and non-negative, got {w}"),
        }),
        _ => Ok(()),
    }
}

fn validate_bound(axis: Axis, bound: &'static str, value: Option<f32>) -> Result<(), ConfigError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(ConfigError::InvalidConstraint {
            axis,
            bound,
            reason: format!("expected a finite non-negative number, got {v}"),
        }),
        _ => Ok(()),
    }
}

/// Flags describing how `new` differs from `old`.
///
/// Sub-trees shared between the two snapshots are skipped, so the cost is
/// proportional to the copied path, not the tree.
pub fn diff(old: &BoxConfig, new: &BoxConfig) -> Mutation {
    let mut changes = Mutation::empty();
    if old.anchor != new.anchor {
        changes |= Mutation::POSITION;
    }
    if old.size != new.size {
        changes |= Mutation::SIZE;
    }
    if old.align != new.align {
        changes |= Mutation::ALIGN;
    }
    if old.pivot != new.pivot {
        changes |= Mutation::PIVOT;
    }
    if old.direction != new.direction {
        changes |= Mutation::DIRECTION;
    }
    if old.order != new.order {
        changes |= Mutation::ORDER;
    }
    if old.absolute != new.absolute {
        changes |= Mutation::ABSOLUTE;
    }
    if old.constrain != new.constrain {
        changes |= Mutation::CONSTRAIN;
    }
    if old.gap != new.gap || old.padding != new.padding {
        changes |= Mutation::SPACING;
    }
    if old.content != new.content {
        changes |= Mutation::CONTENT;
    }

    if old.children.len() != new.children.len()
        || old.children.keys().ne(new.children.keys())
    {
        changes |= Mutation::CHILDREN;
    }
    for (key, new_child) in &new.children {
        if let Some(old_child) = old.children.get(key) {
            if !Rc::ptr_eq(old_child, new_child) {
                changes |= diff(old_child, new_child);
            }
        }
    }
    changes
}
