//! BoxNode - Lazy handle to one node of a [`LayoutTree`].
//!
//! A handle is just the tree plus a key path. Nothing is allocated per
//! node up front: handles are materialized on demand by `root`, `node`,
//! `children` and `get_child`, and two handles to the same path of the same
//! tree compare equal.
//!
//! Every geometry read resolves against the snapshot committed at the time
//! of the read. Every write commits immediately (use
//! [`LayoutTree::batch`] to group writes).
//!
//! # Example
//!
//! ```
//! use spark_layout::config::BoxSpec;
//! use spark_layout::engine::LayoutTree;
//!
//! let tree = LayoutTree::new(&BoxSpec::at(10.0, 20.0).sized(400.0, 100.0)).unwrap();
//! let root = tree.root();
//!
//! let badge = root.add_child("badge", &BoxSpec::at(5.0, 0.0).sized(100.0, 20.0)).unwrap();
//! badge.set_align(spark_layout::types::Axis::X, spark_layout::types::Align::End).unwrap();
//!
//! assert_eq!(badge.x().unwrap(), 295.0);
//! assert_eq!(badge.abs_x().unwrap(), 305.0);
//! ```

use std::fmt;
use std::rc::Rc;

use taffy::geometry::Rect;

use crate::config::BoxSpec;
use crate::error::{ConfigError, LayoutError, Result};
use crate::layout::{Link, Resolver, lineage};
use crate::types::{Align, Axis, Bounds, Content, Direction, Frame, Measure, Pivot, SizeSpec};

use super::box_config::BoxConfig;
use super::tree::LayoutTree;

/// Handle to a node addressed by its key path from the root.
#[derive(Clone)]
pub struct BoxNode {
    tree: LayoutTree,
    path: Rc<[String]>,
}

impl PartialEq for BoxNode {
    fn eq(&self, other: &Self) -> bool {
        self.tree.same_tree(&other.tree) && self.path == other.path
    }
}

impl fmt::Debug for BoxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxNode")
            .field("path", &format_args!("/{}", self.path.join("/")))
            .finish()
    }
}

impl BoxNode {
    pub(crate) fn new(tree: LayoutTree, path: Rc<[String]>) -> Self {
        Self { tree, path }
    }

    fn child_path(&self, key: &str) -> Rc<[String]> {
        let mut path = self.path.to_vec();
        path.push(key.to_string());
        Rc::from(path)
    }

    // =========================================================================
    // Identity
    // =========================================================================

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    /// Keys from the root down to this node. Empty for the root.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Key under which the parent stores this node. `None` for the root.
    pub fn key(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn parent(&self) -> Option<BoxNode> {
        let (_, parents) = self.path.split_last()?;
        Some(BoxNode::new(self.tree.clone(), Rc::from(parents)))
    }

    // =========================================================================
    // Configuration reads
    // =========================================================================

    /// This node's committed configuration.
    pub fn config(&self) -> Result<Rc<BoxConfig>> {
        let snapshot = self.tree.snapshot();
        BoxConfig::descend(&snapshot, self.path())
            .cloned()
            .ok_or_else(|| LayoutError::not_found(self.path()))
    }

    pub fn order(&self) -> Result<f32> {
        Ok(self.config()?.order())
    }

    pub fn direction(&self) -> Result<Direction> {
        Ok(self.config()?.direction())
    }

    pub fn absolute(&self) -> Result<bool> {
        Ok(self.config()?.absolute())
    }

    pub fn content(&self) -> Result<Option<Content>> {
        Ok(self.config()?.content().cloned())
    }

    /// Children in flow and paint order (`order` ascending, then key).
    pub fn children(&self) -> Result<Vec<BoxNode>> {
        let config = self.config()?;
        Ok(config
            .ordered_children()
            .into_iter()
            .map(|(key, _)| BoxNode::new(self.tree.clone(), self.child_path(key)))
            .collect())
    }

    /// Child handle for `key`, or `None` when there is no such child.
    pub fn get_child(&self, key: &str) -> Option<BoxNode> {
        let config = self.config().ok()?;
        config.child(key)?;
        Some(BoxNode::new(self.tree.clone(), self.child_path(key)))
    }

    // =========================================================================
    // Geometry reads
    // =========================================================================

    fn resolve<T>(&self, read: impl FnOnce(&Resolver<'_>, &[Link<'_>]) -> Result<T>) -> Result<T> {
        let snapshot = self.tree.snapshot();
        let links =
            lineage(&snapshot, self.path()).ok_or_else(|| LayoutError::not_found(self.path()))?;
        let measurer = self.tree.measurer();
        let resolver = Resolver::new(&*measurer);
        read(&resolver, &links)
    }

    /// Left edge in the parent's frame.
    pub fn x(&self) -> Result<f32> {
        self.resolve(|resolver, links| resolver.position(links, Axis::X))
    }

    /// Top edge in the parent's frame.
    pub fn y(&self) -> Result<f32> {
        self.resolve(|resolver, links| resolver.position(links, Axis::Y))
    }

    pub fn width(&self) -> Result<f32> {
        self.resolve(|resolver, links| resolver.size(links, Axis::X))
    }

    pub fn height(&self) -> Result<f32> {
        self.resolve(|resolver, links| resolver.size(links, Axis::Y))
    }

    /// Left edge in the root's frame.
    pub fn abs_x(&self) -> Result<f32> {
        self.resolve(|resolver, links| resolver.world(links, Axis::X))
    }

    /// Top edge in the root's frame.
    pub fn abs_y(&self) -> Result<f32> {
        self.resolve(|resolver, links| resolver.world(links, Axis::Y))
    }

    /// Everything above, resolved against one snapshot.
    pub fn frame(&self) -> Result<Frame> {
        self.resolve(|resolver, links| resolver.frame(links))
    }

    // =========================================================================
    // Writes
    // =========================================================================

    fn update<T>(&self, edit: impl FnOnce(&mut BoxConfig) -> Result<T>) -> Result<T> {
        self.tree.commit_at(self.path(), edit)
    }

    /// Set literal pixel anchors on both axes.
    pub fn set_position(&self, x: f32, y: f32) -> Result<()> {
        self.update(|config| {
            config.set_anchor(Axis::X, Measure::Px(x))?;
            config.set_anchor(Axis::Y, Measure::Px(y))?;
            Ok(())
        })
    }

    /// Set the configured anchor on one axis. The root only accepts pixels.
    pub fn set_anchor(&self, axis: Axis, anchor: Measure) -> Result<()> {
        if self.is_root() && !matches!(anchor, Measure::Px(_)) {
            return Err(ConfigError::RootAnchor { axis }.into());
        }
        self.update(|config| Ok(config.set_anchor(axis, anchor)?))
    }

    pub fn set_size(&self, axis: Axis, spec: SizeSpec) -> Result<()> {
        self.update(|config| Ok(config.set_size_spec(axis, spec)?))
    }

    pub fn set_width_px(&self, width: f32) -> Result<()> {
        self.set_size(Axis::X, SizeSpec::Px(width))
    }

    /// Width as a fraction of the parent's inner width, in `[0, 1]`.
    pub fn set_width_percent(&self, percent: f32) -> Result<()> {
        self.set_size(Axis::X, SizeSpec::Percent(percent))
    }

    pub fn set_height_px(&self, height: f32) -> Result<()> {
        self.set_size(Axis::Y, SizeSpec::Px(height))
    }

    pub fn set_height_percent(&self, percent: f32) -> Result<()> {
        self.set_size(Axis::Y, SizeSpec::Percent(percent))
    }

    pub fn set_order(&self, order: f32) -> Result<()> {
        self.update(|config| Ok(config.set_order(order)?))
    }

    pub fn set_direction(&self, direction: Direction) -> Result<()> {
        self.update(|config| {
            config.set_direction(direction);
            Ok(())
        })
    }

    pub fn set_absolute(&self, absolute: bool) -> Result<()> {
        self.update(|config| {
            config.set_absolute(absolute);
            Ok(())
        })
    }

    pub fn set_content(&self, content: Option<Content>) -> Result<()> {
        self.update(|config| {
            config.set_content(content);
            Ok(())
        })
    }

    pub fn set_constraint(&self, axis: Axis, bounds: Option<Bounds>) -> Result<()> {
        self.update(|config| Ok(config.set_constraint(axis, bounds)?))
    }

    pub fn set_align(&self, axis: Axis, align: Align) -> Result<()> {
        self.update(|config| {
            config.set_align(axis, align);
            Ok(())
        })
    }

    pub fn set_pivot(&self, axis: Axis, pivot: Pivot) -> Result<()> {
        self.update(|config| {
            config.set_pivot(axis, pivot);
            Ok(())
        })
    }

    pub fn set_gap(&self, gap: f32) -> Result<()> {
        self.update(|config| Ok(config.set_gap(gap)?))
    }

    pub fn set_padding(&self, padding: Rect<f32>) -> Result<()> {
        self.update(|config| Ok(config.set_padding(padding)?))
    }

    // =========================================================================
    // Child lifecycle
    // =========================================================================

    /// Add a child and return its handle.
    ///
    /// Fails with [`LayoutError::DuplicateChildKey`] if `key` is taken, or
    /// with a configuration error if `spec` is invalid. Either way nothing
    /// is committed.
    pub fn add_child(&self, key: &str, spec: &BoxSpec) -> Result<BoxNode> {
        self.tree.batch(|draft| draft.add_child(self.path(), key, spec))?;
        log::debug!("added child `{key}` under {self:?}");
        Ok(BoxNode::new(self.tree.clone(), self.child_path(key)))
    }

    /// Remove a child. Absent keys are a no-op.
    pub fn remove_child(&self, key: &str) -> Result<()> {
        let removed = self.tree.batch(|draft| draft.remove_child(self.path(), key))?;
        if removed {
            log::debug!("removed child `{key}` from {self:?}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_tree() -> LayoutTree {
        let spec = BoxSpec::at(0.0, 0.0)
            .sized(100.0, 40.0)
            .with_direction("row")
            .with_child("a", BoxSpec::default().sized(10.0, 10.0))
            .with_child("b", BoxSpec::default().sized(10.0, 10.0));
        LayoutTree::new(&spec).unwrap()
    }

    #[test]
    fn test_handles_are_idempotent() {
        let tree = row_tree();
        let first = tree.root().get_child("a").unwrap();
        let second = tree.node(&["a"]).unwrap();
        assert_eq!(first, second);
        assert_ne!(first, tree.root().get_child("b").unwrap());
        assert_eq!(first.parent(), Some(tree.root()));
        assert_eq!(first.key(), Some("a"));
        assert_eq!(tree.root().key(), None);
    }

    #[test]
    fn test_second_row_child_follows_first() {
        let tree = row_tree();
        let b = tree.node(&["b"]).unwrap();
        assert_eq!(b.x().unwrap(), 10.0);
        assert_eq!(b.y().unwrap(), 0.0);
    }

    #[test]
    fn test_get_child_absent_is_none() {
        let tree = row_tree();
        assert!(tree.root().get_child("missing").is_none());
        tree.root().remove_child("missing").unwrap();
        assert_eq!(tree.version(), 0);
    }

    #[test]
    fn test_add_child_duplicate_key() {
        let tree = row_tree();
        let err = tree.root().add_child("a", &BoxSpec::default()).unwrap_err();
        assert_eq!(err, LayoutError::DuplicateChildKey { key: "a".to_string() });
        assert_eq!(tree.version(), 0);
    }

    #[test]
    fn test_add_child_invalid_spec_commits_nothing() {
        let tree = row_tree();
        let mut spec = BoxSpec::default();
        spec.align.x = Some("sideways".to_string());

        let err = tree.root().add_child("c", &spec).unwrap_err();
        assert!(matches!(err, LayoutError::Config(ConfigError::Child { .. })));
        assert!(tree.root().get_child("c").is_none());
        assert_eq!(tree.version(), 0);
    }

    #[test]
    fn test_removed_handle_reports_not_found() {
        let tree = row_tree();
        let a = tree.node(&["a"]).unwrap();
        tree.root().remove_child("a").unwrap();

        assert_eq!(
            a.width(),
            Err(LayoutError::NodeNotFound { path: "/a".to_string() })
        );
        assert!(a.set_order(1.0).is_err());
        assert!(a.get_child("x").is_none());
    }

    #[test]
    fn test_root_rejects_percent_position() {
        let tree = row_tree();
        let err = tree.root().set_anchor(Axis::X, Measure::Percent(0.5)).unwrap_err();
        assert_eq!(err, LayoutError::Config(ConfigError::RootAnchor { axis: Axis::X }));
    }

    #[test]
    fn test_invalid_write_keeps_snapshot() {
        let tree = row_tree();
        let a = tree.node(&["a"]).unwrap();
        assert!(a.set_width_percent(2.0).is_err());
        assert!(a.set_gap(f32::NAN).is_err());
        assert_eq!(a.width().unwrap(), 10.0);
        assert_eq!(tree.version(), 0);
    }

    #[test]
    fn test_children_follow_order() {
        let tree = row_tree();
        tree.node(&["a"]).unwrap().set_order(3.0).unwrap();

        let keys: Vec<String> = tree
            .root()
            .children()
            .unwrap()
            .iter()
            .map(|child| child.key().unwrap_or_default().to_string())
            .collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(tree.node(&["a"]).unwrap().x().unwrap(), 10.0);
    }
}
