//! Resolver - pull-based geometry over one snapshot.
//!
//! Every read walks the committed tree fresh: nothing is cached between
//! calls. A read starts from a [`Link`] chain (the lineage) running from the
//! root down to the node being resolved, so parents are reachable without
//! back-references in the snapshot itself.
//!
//! The per-concern rules live in sibling modules and are implemented as
//! `impl Resolver` blocks:
//! - `axis`: sizes, inner sizes and offered space
//! - `distribute`: flow layout and hug extents
//! - `flow`: flow offsets
//! - `anchor`: alignment-adjusted anchors

use crate::engine::BoxConfig;
use crate::error::Result;
use crate::types::{Axis, Frame};

use super::content_measure::ContentMeasurer;
use super::pivot;

/// One step of a lineage: a node and the key its parent stores it under.
#[derive(Debug, Clone, Copy)]
pub struct Link<'a> {
    /// Empty for the root.
    pub key: &'a str,
    pub config: &'a BoxConfig,
}

/// Build the lineage for `path` below `root`. `None` when any key is missing.
pub fn lineage<'a>(root: &'a BoxConfig, path: &'a [String]) -> Option<Vec<Link<'a>>> {
    let mut links = Vec::with_capacity(path.len() + 1);
    links.push(Link { key: "", config: root });
    let mut current = root;
    for key in path {
        current = &**current.child(key)?;
        links.push(Link { key, config: current });
    }
    Some(links)
}

/// Split a lineage into the node and its parent's lineage.
#[inline]
pub(crate) fn split<'l, 'a>(lineage: &'l [Link<'a>]) -> (Link<'a>, Option<&'l [Link<'a>]>) {
    match lineage {
        [] => unreachable!("a lineage always contains the root"),
        [root] => (*root, None),
        [parents @ .., node] => (*node, Some(parents)),
    }
}

/// Geometry resolver bound to a content measurer.
pub struct Resolver<'m> {
    pub(crate) measurer: &'m dyn ContentMeasurer,
}

impl<'m> Resolver<'m> {
    pub fn new(measurer: &'m dyn ContentMeasurer) -> Self {
        Self { measurer }
    }

    /// Top-left coordinate of the node in its parent's frame.
    pub fn position(&self, lineage: &[Link<'_>], axis: Axis) -> Result<f32> {
        let (node, _) = split(lineage);
        let anchor = self.anchor(lineage, axis)?;
        let size = self.size(lineage, axis)?;
        Ok(pivot::top_left(anchor, node.config.pivot(axis), size))
    }

    /// Coordinate in the root's frame: the sum of positions down the lineage.
    pub fn world(&self, lineage: &[Link<'_>], axis: Axis) -> Result<f32> {
        let mut total = 0.0;
        for depth in 1..=lineage.len() {
            total += self.position(&lineage[..depth], axis)?;
        }
        Ok(total)
    }

    /// Full resolved geometry of the node.
    pub fn frame(&self, lineage: &[Link<'_>]) -> Result<Frame> {
        Ok(Frame {
            x: self.position(lineage, Axis::X)?,
            y: self.position(lineage, Axis::Y)?,
            width: self.size(lineage, Axis::X)?,
            height: self.size(lineage, Axis::Y)?,
            abs_x: self.world(lineage, Axis::X)?,
            abs_y: self.world(lineage, Axis::Y)?,
        })
    }
}
