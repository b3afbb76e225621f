//! Wireframe preview on a 2D canvas.
//!
//! Stands in for the real renderer: projects every mesh of the scene graph
//! through the session camera and strokes its edges, highlighting the
//! selection and drawing the gizmo axes on the attached node.

use crate::constants::{
    BACKDROP_COLOR, BACKGROUND_COLOR, GIZMO_AXIS_COLORS, GIZMO_AXIS_LENGTH, LABEL_FONT,
    LINE_WIDTH_PX, SELECTED_COLOR, SELECTED_LINE_WIDTH_PX,
};
use crate::input::ndc_to_px;
use builder_core::{Camera, EditorSession, Geometry, NodeId, NodeKind, NodeRole, SceneGraph};
use glam::{Mat4, Vec2, Vec3};
use web_sys as web;

pub struct Preview {
    ctx: web::CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl Preview {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            width: 1.0,
            height: 1.0,
        }
    }

    pub fn draw(&mut self, canvas: &web::HtmlCanvasElement, session: &EditorSession) {
        self.width = canvas.width() as f32;
        self.height = canvas.height() as f32;
        self.ctx.set_fill_style_str(BACKGROUND_COLOR);
        self.ctx
            .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);

        let scene = session.scene();
        let camera = session.camera();
        let selected_root = session
            .selected()
            .and_then(|id| session.registry().get(id))
            .map(|i| i.node);
        let highlighted: Vec<NodeId> = selected_root
            .map(|n| scene.descendants(n))
            .unwrap_or_default();

        for id in scene.descendants(scene.root()) {
            let Some(node) = scene.node(id) else { continue };
            let NodeKind::Mesh { geometry, material } = &node.kind else {
                continue;
            };
            let selected = highlighted.contains(&id);
            let color = match (selected, node.role) {
                (true, _) => SELECTED_COLOR.to_string(),
                (false, NodeRole::Backdrop) => BACKDROP_COLOR.to_string(),
                (false, _) => css_rgb(material.color),
            };
            self.ctx.set_stroke_style_str(&color);
            self.ctx.set_line_width(if selected {
                SELECTED_LINE_WIDTH_PX
            } else {
                LINE_WIDTH_PX
            });
            self.stroke_edges(camera, scene.world_matrix(id), geometry);
        }

        let gadget = session.selection().gadget();
        if let Some(node) = gadget.attached() {
            self.draw_gizmo(camera, scene, node, gadget.mode().label());
        }
    }

    fn stroke_edges(&self, camera: &Camera, world: Mat4, geometry: &Geometry) {
        self.ctx.begin_path();
        for (a, b) in edges(geometry) {
            let (Some(pa), Some(pb)) = (
                self.to_px(camera, world.transform_point3(a)),
                self.to_px(camera, world.transform_point3(b)),
            ) else {
                continue;
            };
            self.ctx.move_to(pa.x as f64, pa.y as f64);
            self.ctx.line_to(pb.x as f64, pb.y as f64);
        }
        self.ctx.stroke();
    }

    fn draw_gizmo(&self, camera: &Camera, scene: &SceneGraph, node: NodeId, label: &str) {
        let origin = scene.world_matrix(node).transform_point3(Vec3::ZERO);
        let Some(po) = self.to_px(camera, origin) else {
            return;
        };
        for (axis, color) in [Vec3::X, Vec3::Y, Vec3::Z].into_iter().zip(GIZMO_AXIS_COLORS) {
            let Some(pa) = self.to_px(camera, origin + axis * GIZMO_AXIS_LENGTH) else {
                continue;
            };
            self.ctx.set_stroke_style_str(color);
            self.ctx.set_line_width(SELECTED_LINE_WIDTH_PX);
            self.ctx.begin_path();
            self.ctx.move_to(po.x as f64, po.y as f64);
            self.ctx.line_to(pa.x as f64, pa.y as f64);
            self.ctx.stroke();
        }
        self.ctx.set_fill_style_str(SELECTED_COLOR);
        self.ctx.set_font(LABEL_FONT);
        _ = self.ctx.fill_text(label, po.x as f64 + 8.0, po.y as f64 - 8.0);
    }

    fn to_px(&self, camera: &Camera, world: Vec3) -> Option<Vec2> {
        let ndc = camera.project(world)?;
        Some(ndc_to_px(ndc.truncate(), self.width, self.height))
    }
}

fn edges(geometry: &Geometry) -> Vec<(Vec3, Vec3)> {
    match geometry {
        Geometry::Cuboid { .. } => {
            // Corner indices differ in exactly one bit along an edge.
            let c = geometry.vertices();
            let mut out = Vec::with_capacity(12);
            for i in 0..8usize {
                for bit in [1usize, 2, 4] {
                    if i & bit == 0 {
                        out.push((c[i], c[i | bit]));
                    }
                }
            }
            out
        }
        Geometry::TriangleMesh { .. } => geometry
            .triangles()
            .into_iter()
            .flat_map(|[a, b, c]| [(a, b), (b, c), (c, a)])
            .collect(),
    }
}

fn css_rgb(color: [f32; 3]) -> String {
    let [r, g, b] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("rgb({r}, {g}, {b})")
}
