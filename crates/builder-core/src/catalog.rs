//! Catalog of spawnable models and the loader seam that yields their nodes.

use crate::error::{EditorError, Result};
use crate::scene::{Geometry, Material, NodeRecord, Transform};
use crate::vehicle::{VehicleType, VEHICLE_ASSET_PREFIX};
use glam::Vec3;
use std::future::Future;
use std::pin::Pin;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CatalogItem {
    pub id: &'static str,
    pub label: &'static str,
    /// Scale applied to a unit cube, i.e. the item's size in metres.
    pub default_scale: [f32; 3],
    pub color: [f32; 3],
}

pub const CATALOG: &[CatalogItem] = &[
    CatalogItem {
        id: "cupboard",
        label: "Cupboard",
        default_scale: [1.5, 1.2, 1.0],
        color: [0.62, 0.44, 0.28],
    },
    CatalogItem {
        id: "bed",
        label: "Bed",
        default_scale: [1.9, 0.45, 1.4],
        color: [0.35, 0.45, 0.7],
    },
    CatalogItem {
        id: "bench",
        label: "Bench",
        default_scale: [1.2, 0.45, 0.5],
        color: [0.5, 0.5, 0.5],
    },
    CatalogItem {
        id: "fridge",
        label: "Fridge",
        default_scale: [0.5, 0.85, 0.55],
        color: [0.9, 0.9, 0.92],
    },
    CatalogItem {
        id: "sink",
        label: "Sink",
        default_scale: [0.6, 0.9, 0.5],
        color: [0.7, 0.75, 0.8],
    },
];

pub fn find_item(id: &str) -> Option<&'static CatalogItem> {
    CATALOG.iter().find(|i| i.id == id)
}

impl CatalogItem {
    /// Group at the default scale, resting on the floor, with a unit-cube body.
    pub fn template(&self) -> NodeRecord {
        let scale = Vec3::from_array(self.default_scale);
        NodeRecord::group(
            self.label,
            Transform::from_position_scale(Vec3::new(0.0, scale.y * 0.5, 0.0), scale),
            vec![NodeRecord::mesh(
                "body",
                Geometry::unit_cube(),
                Material {
                    color: self.color,
                    opacity: 1.0,
                },
                Transform::IDENTITY,
            )],
        )
    }
}

pub type LoadFuture = Pin<Box<dyn Future<Output = Result<NodeRecord>>>>;

/// Asynchronously yields a positioned node for an asset id.
pub trait CatalogLoader {
    fn load(&self, asset_id: &str) -> LoadFuture;
}

/// Builds catalog items and vehicle backdrops from built-in descriptions.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProceduralCatalog;

impl ProceduralCatalog {
    pub fn build(asset_id: &str) -> Result<NodeRecord> {
        if let Some(name) = asset_id.strip_prefix(VEHICLE_ASSET_PREFIX) {
            return name
                .parse::<VehicleType>()
                .map(VehicleType::backdrop_template)
                .map_err(|e| EditorError::AssetLoad {
                    asset: asset_id.to_string(),
                    reason: e.to_string(),
                });
        }
        find_item(asset_id)
            .map(CatalogItem::template)
            .ok_or_else(|| EditorError::UnknownAsset(asset_id.to_string()))
    }
}

impl CatalogLoader for ProceduralCatalog {
    fn load(&self, asset_id: &str) -> LoadFuture {
        Box::pin(std::future::ready(Self::build(asset_id)))
    }
}
