//! LayoutTree - Committed snapshot store.
//!
//! The tree owns one `Rc<BoxConfig>` root and publishes it through a
//! spark-signals `Signal`, so deriveds and effects that read geometry
//! re-run on every commit.
//!
//! # Commits
//!
//! Every mutation runs a producer against a copy-on-write draft:
//!
//! 1. Clone the root `Rc` (cheap) into a [`Draft`]
//! 2. The producer edits nodes through `Rc::make_mut`, copying only the path
//! 3. On error nothing is published
//! 4. Otherwise the draft is diffed against the committed snapshot; an
//!    empty diff publishes nothing and keeps the version
//!
//! Reads made while committing go through an untracked copy of the root, so
//! mutating from inside an effect does not subscribe that effect.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::config::BoxSpec;
use crate::error::{LayoutError, Result};
use crate::layout::{ContentMeasurer, OpaqueContent};
use crate::types::Mutation;

use super::box_config::{BoxConfig, diff};
use super::box_node::BoxNode;

// =============================================================================
// Tree State
// =============================================================================

struct TreeState {
    /// Untracked mirror of the published snapshot.
    committed: RefCell<Rc<BoxConfig>>,
    snapshot: Signal<Rc<BoxConfig>>,
    version: Cell<u64>,
    last_mutation: Cell<Mutation>,
    measurer: RefCell<Rc<dyn ContentMeasurer>>,
}

/// A layout tree: one committed snapshot plus the signal that publishes it.
///
/// Cloning is cheap and yields another handle to the same tree.
#[derive(Clone)]
pub struct LayoutTree {
    state: Rc<TreeState>,
}

impl LayoutTree {
    /// Build a tree from a root specification.
    ///
    /// The root must carry literal pixel `x` and `y` anchors.
    pub fn new(spec: &BoxSpec) -> Result<Self> {
        let root = Rc::new(spec.normalize_root()?);
        log::debug!("layout tree created with {} root children", root.ordered_children().len());
        Ok(Self {
            state: Rc::new(TreeState {
                committed: RefCell::new(Rc::clone(&root)),
                snapshot: signal(root),
                version: Cell::new(0),
                last_mutation: Cell::new(Mutation::empty()),
                measurer: RefCell::new(Rc::new(OpaqueContent)),
            }),
        })
    }

    /// Parse and build a tree from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(&BoxSpec::from_json(json)?)
    }

    /// Replace the content measurer used by hug sizing.
    pub fn with_measurer(self, measurer: impl ContentMeasurer + 'static) -> Self {
        *self.state.measurer.borrow_mut() = Rc::new(measurer);
        self
    }

    pub fn measurer(&self) -> Rc<dyn ContentMeasurer> {
        Rc::clone(&self.state.measurer.borrow())
    }

    // =========================================================================
    // Handles
    // =========================================================================

    pub fn root(&self) -> BoxNode {
        BoxNode::new(self.clone(), Rc::from(Vec::new()))
    }

    /// Handle for the node at `path` below the root.
    pub fn node(&self, path: &[&str]) -> Result<BoxNode> {
        let path: Vec<String> = path.iter().map(|key| key.to_string()).collect();
        if BoxConfig::descend(&self.state.committed.borrow(), &path).is_none() {
            return Err(LayoutError::not_found(&path));
        }
        Ok(BoxNode::new(self.clone(), Rc::from(path)))
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// The committed snapshot. Tracked: reading it inside a derived or effect
    /// subscribes to commits.
    pub fn snapshot(&self) -> Rc<BoxConfig> {
        self.state.snapshot.get()
    }

    pub fn snapshot_signal(&self) -> Signal<Rc<BoxConfig>> {
        self.state.snapshot.clone()
    }

    /// Number of commits that changed the tree.
    pub fn version(&self) -> u64 {
        self.state.version.get()
    }

    /// What the most recent effective commit changed.
    pub fn last_mutation(&self) -> Mutation {
        self.state.last_mutation.get()
    }

    pub(crate) fn committed(&self) -> Rc<BoxConfig> {
        Rc::clone(&self.state.committed.borrow())
    }

    pub(crate) fn same_tree(&self, other: &LayoutTree) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Run several edits and commit them as one snapshot.
    ///
    /// If `producer` fails, nothing is committed.
    pub fn batch<T>(&self, producer: impl FnOnce(&mut Draft) -> Result<T>) -> Result<T> {
        let mut draft = Draft {
            root: self.committed(),
        };
        let value = producer(&mut draft)?;
        self.publish(draft.root);
        Ok(value)
    }

    /// Edit the node at `path` and commit.
    pub(crate) fn commit_at<T>(
        &self,
        path: &[String],
        producer: impl FnOnce(&mut BoxConfig) -> Result<T>,
    ) -> Result<T> {
        self.batch(|draft| producer(draft.node_mut(path)?))
    }

    fn publish(&self, next: Rc<BoxConfig>) {
        let previous = self.committed();
        if Rc::ptr_eq(&previous, &next) {
            return;
        }
        let changes = diff(&previous, &next);
        if changes.is_empty() {
            log::trace!("commit produced no changes");
            return;
        }

        let version = self.state.version.get() + 1;
        self.state.version.set(version);
        self.state.last_mutation.set(changes);
        *self.state.committed.borrow_mut() = Rc::clone(&next);
        if changes.affects_paint_order() {
            log::debug!("commit v{version}: {changes:?} (paint order may change)");
        } else {
            log::debug!("commit v{version}: {changes:?}");
        }
        self.state.snapshot.set(next);
    }
}

// =============================================================================
// Draft
// =============================================================================

/// A copy-on-write working copy of the tree, handed to [`LayoutTree::batch`].
pub struct Draft {
    root: Rc<BoxConfig>,
}

impl Draft {
    /// Mutable access to the node at `path`, copying it and its ancestors.
    pub fn node_mut<S: AsRef<str>>(&mut self, path: &[S]) -> Result<&mut BoxConfig> {
        // Check first so a bad path copies nothing.
        self.node(path)?;
        BoxConfig::descend_mut(&mut self.root, path).ok_or_else(|| not_found(path))
    }

    pub fn root_mut(&mut self) -> &mut BoxConfig {
        Rc::make_mut(&mut self.root)
    }

    /// Add a child under the node at `path`.
    pub fn add_child<S: AsRef<str>>(
        &mut self,
        path: &[S],
        key: &str,
        spec: &BoxSpec,
    ) -> Result<()> {
        let child = spec.normalize().map_err(|err| err.in_child(key))?;
        if self.node(path)?.child(key).is_some() {
            return Err(LayoutError::DuplicateChildKey {
                key: key.to_string(),
            });
        }
        self.node_mut(path)?.insert_child(key, child);
        Ok(())
    }

    /// Remove a child under the node at `path`. Absent keys are ignored.
    pub fn remove_child<S: AsRef<str>>(&mut self, path: &[S], key: &str) -> Result<bool> {
        if self.node(path)?.child(key).is_none() {
            return Ok(false);
        }
        Ok(self.node_mut(path)?.remove_child(key))
    }

    fn node<S: AsRef<str>>(&self, path: &[S]) -> Result<&Rc<BoxConfig>> {
        BoxConfig::descend(&self.root, path).ok_or_else(|| not_found(path))
    }
}

fn not_found<S: AsRef<str>>(path: &[S]) -> LayoutError {
    let keys: Vec<String> = path.iter().map(|key| key.as_ref().to_string()).collect();
    LayoutError::not_found(&keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::types::Axis;

    fn tree() -> LayoutTree {
        let spec = BoxSpec::at(0.0, 0.0)
            .sized(100.0, 100.0)
            .with_child("a", BoxSpec::default())
            .with_child("b", BoxSpec::default());
        LayoutTree::new(&spec).unwrap()
    }

    #[test]
    fn test_root_requires_anchor() {
        let result = LayoutTree::new(&BoxSpec::default());
        assert!(matches!(
            result,
            Err(LayoutError::Config(ConfigError::RootAnchor { axis: Axis::X }))
        ));
    }

    #[test]
    fn test_batch_commits_once() {
        let tree = tree();
        tree.batch(|draft| {
            draft.node_mut(&["a"])?.set_order(5.0)?;
            draft.node_mut(&["b"])?.set_gap(2.0)?;
            Ok(())
        })
        .unwrap();

        assert_eq!(tree.version(), 1);
        assert_eq!(tree.last_mutation(), Mutation::ORDER | Mutation::SPACING);
    }

    #[test]
    fn test_failed_batch_commits_nothing() {
        let tree = tree();
        let before = tree.snapshot();

        let result = tree.batch(|draft| {
            draft.node_mut(&["a"])?.set_order(5.0)?;
            draft.node_mut(&["b"])?.set_gap(-1.0)?;
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(tree.version(), 0);
        assert!(Rc::ptr_eq(&before, &tree.snapshot()));
    }

    #[test]
    fn test_noop_commit_keeps_version() {
        let tree = tree();
        tree.batch(|draft| {
            draft.node_mut(&["a"])?.set_order(0.0)?;
            Ok(())
        })
        .unwrap();
        assert_eq!(tree.version(), 0);
        assert_eq!(tree.last_mutation(), Mutation::empty());
    }

    #[test]
    fn test_draft_child_lifecycle() {
        let tree = tree();
        let no_path: [&str; 0] = [];

        tree.batch(|draft| draft.add_child(&no_path, "c", &BoxSpec::default())).unwrap();
        assert!(tree.snapshot().child("c").is_some());
        assert_eq!(tree.last_mutation(), Mutation::CHILDREN);

        let duplicate = tree.batch(|draft| draft.add_child(&no_path, "c", &BoxSpec::default()));
        assert_eq!(
            duplicate,
            Err(LayoutError::DuplicateChildKey { key: "c".to_string() })
        );

        let removed = tree.batch(|draft| draft.remove_child(&no_path, "missing")).unwrap();
        assert!(!removed);
        assert_eq!(tree.version(), 1);
    }

    #[test]
    fn test_node_lookup() {
        let tree = tree();
        assert!(tree.node(&["a"]).is_ok());
        assert_eq!(
            tree.node(&["a", "zz"]).unwrap_err(),
            LayoutError::NodeNotFound { path: "/a/zz".to_string() }
        );
    }
}
