//! Vehicle type choice and the once-per-session backdrop bootstrap.

use crate::error::{EditorError, Result};
use crate::scene::{Geometry, Material, NodeId, NodeRecord, NodeRole, SceneGraph, Transform};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub(crate) const VEHICLE_ASSET_PREFIX: &str = "vehicle/";
const FLOOR_THICKNESS: f32 = 0.05;
const WALL_THICKNESS: f32 = 0.04;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Sprinter,
    Transit,
}

impl VehicleType {
    pub const ALL: [VehicleType; 2] = [VehicleType::Sprinter, VehicleType::Transit];

    pub fn name(self) -> &'static str {
        match self {
            VehicleType::Sprinter => "sprinter",
            VehicleType::Transit => "transit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Sprinter => "Sprinter L2H2",
            VehicleType::Transit => "Transit L2H2",
        }
    }

    pub fn asset_id(self) -> String {
        format!("{VEHICLE_ASSET_PREFIX}{}", self.name())
    }

    pub fn from_asset_id(asset_id: &str) -> Option<Self> {
        asset_id
            .strip_prefix(VEHICLE_ASSET_PREFIX)
            .and_then(|name| name.parse().ok())
    }

    /// Interior cargo box (length, height, width) in metres.
    pub fn cargo_size(self) -> Vec3 {
        match self {
            VehicleType::Sprinter => Vec3::new(4.3, 1.9, 1.78),
            VehicleType::Transit => Vec3::new(3.5, 1.78, 1.76),
        }
    }

    /// Floor plus four translucent walls around the cargo box, floor top at y = 0.
    pub fn backdrop_template(self) -> NodeRecord {
        let size = self.cargo_size();
        let floor = Material {
            color: [0.55, 0.45, 0.35],
            opacity: 1.0,
        };
        let wall = Material {
            color: [0.85, 0.88, 0.92],
            opacity: 0.25,
        };
        let slab = |name: &str, dims: Vec3, at: Vec3, material: Material| {
            NodeRecord::mesh(
                name,
                Geometry::Cuboid { size: dims },
                material,
                Transform::from_position_scale(at, Vec3::ONE),
            )
        };
        let (l, h, w) = (size.x, size.y, size.z);
        NodeRecord::group(
            self.label(),
            Transform::IDENTITY,
            vec![
                slab(
                    "floor",
                    Vec3::new(l, FLOOR_THICKNESS, w),
                    Vec3::new(0.0, -FLOOR_THICKNESS * 0.5, 0.0),
                    floor,
                ),
                slab(
                    "wall-left",
                    Vec3::new(l, h, WALL_THICKNESS),
                    Vec3::new(0.0, h * 0.5, -w * 0.5),
                    wall,
                ),
                slab(
                    "wall-right",
                    Vec3::new(l, h, WALL_THICKNESS),
                    Vec3::new(0.0, h * 0.5, w * 0.5),
                    wall,
                ),
                slab(
                    "bulkhead",
                    Vec3::new(WALL_THICKNESS, h, w),
                    Vec3::new(-l * 0.5, h * 0.5, 0.0),
                    wall,
                ),
                slab(
                    "rear-doors",
                    Vec3::new(WALL_THICKNESS, h, w),
                    Vec3::new(l * 0.5, h * 0.5, 0.0),
                    wall,
                ),
            ],
        )
    }

    pub fn to_json(self) -> String {
        format!("\"{}\"", self.name())
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|_| EditorError::UnknownVehicle(raw.to_string()))
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleType {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sprinter" => Ok(VehicleType::Sprinter),
            "transit" => Ok(VehicleType::Transit),
            _ => Err(EditorError::UnknownVehicle(s.to_string())),
        }
    }
}

/// Adds the chosen vehicle's backdrop exactly once and remembers it.
#[derive(Clone, Debug, Default)]
pub struct VehicleBootstrap {
    chosen: Option<(VehicleType, NodeId)>,
}

impl VehicleBootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vehicle(&self) -> Option<VehicleType> {
        self.chosen.map(|(v, _)| v)
    }

    pub fn backdrop(&self) -> Option<NodeId> {
        self.chosen.map(|(_, n)| n)
    }

    /// Insert `template` as a permanent root child for `vehicle`.
    ///
    /// Repeating the same vehicle returns the existing backdrop; a different
    /// vehicle is rejected.
    pub fn ensure(
        &mut self,
        vehicle: VehicleType,
        template: &NodeRecord,
        scene: &mut SceneGraph,
    ) -> Result<NodeId> {
        match self.chosen {
            Some((v, node)) if v == vehicle => Ok(node),
            Some((v, _)) => Err(EditorError::VehicleAlreadyChosen {
                chosen: v.to_string(),
                requested: vehicle.to_string(),
            }),
            None => {
                let node = scene.instantiate(scene.root(), template, NodeRole::Backdrop);
                self.chosen = Some((vehicle, node));
                log::info!("[vehicle] loaded backdrop for {}", vehicle);
                Ok(node)
            }
        }
    }
}
