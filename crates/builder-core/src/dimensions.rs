//! World-space bounding boxes and the dimension readout shown for the selection.

use crate::constants::DIMENSION_DECIMALS;
use crate::scene::{NodeId, NodeKind, SceneGraph};
use glam::Vec3;

/// Axis-aligned bounding box. Always derived from geometry, never authoritative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    pub fn extend(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Union of every descendant mesh vertex of `node`, in world space.
pub fn world_aabb(scene: &SceneGraph, node: NodeId) -> Option<Aabb> {
    let mut bounds = Aabb::empty();
    for id in scene.descendants(node) {
        let Some(NodeKind::Mesh { geometry, .. }) = scene.node(id).map(|n| &n.kind) else {
            continue;
        };
        let world = scene.world_matrix(id);
        for v in geometry.vertices() {
            bounds.extend(world.transform_point3(v));
        }
    }
    (!bounds.is_empty()).then_some(bounds)
}

/// Round half away from zero to `decimals` places.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (value * f).round() / f
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub length: f64,
    pub height: f64,
    pub width: f64,
}

impl Dimensions {
    /// Extents along x (length), y (height) and z (width), rounded for display.
    pub fn from_aabb(bounds: &Aabb) -> Self {
        let s = bounds.size();
        Self {
            length: round_to(s.x as f64, DIMENSION_DECIMALS),
            height: round_to(s.y as f64, DIMENSION_DECIMALS),
            width: round_to(s.z as f64, DIMENSION_DECIMALS),
        }
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("length: {}", self.length),
            format!("height: {}", self.height),
            format!("width: {}", self.width),
        ]
    }
}

/// What the host shows next to the canvas for the current selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InfoPanel {
    pub visible: bool,
    pub title: String,
    pub dimensions: Option<Dimensions>,
    /// Bumped on every refresh, so hosts can skip redrawing an unchanged panel.
    pub revision: u64,
}

impl InfoPanel {
    pub fn show(&mut self, title: impl Into<String>, dimensions: Option<Dimensions>) {
        self.visible = true;
        self.title = title.into();
        self.dimensions = dimensions;
        self.revision += 1;
    }

    pub fn hide(&mut self) {
        if self.visible {
            self.revision += 1;
        }
        self.visible = false;
        self.title.clear();
        self.dimensions = None;
    }

    pub fn lines(&self) -> Vec<String> {
        if !self.visible {
            return Vec::new();
        }
        self.dimensions
            .map(|d| d.lines().to_vec())
            .unwrap_or_default()
    }
}
