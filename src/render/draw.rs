use crate::{
    foundation::core::{Affine, Rect},
    scene::{
        graph::Scene,
        object::{ObjectId, SceneObject, Shape},
    },
};

/// What a draw op paints.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DrawKind {
    /// Filled box.
    Fill,
    /// Box outline only (frames).
    Stroke,
    /// Bitmap from `src`.
    Image {
        /// Image source.
        src: String,
    },
}

/// One draw call: paint `kind` over `local_rect` under `transform`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawOp {
    /// Object the op draws.
    pub id: ObjectId,
    /// What is painted.
    pub kind: DrawKind,
    /// Object-to-scene matrix.
    pub transform: Affine,
    /// Rect in local space that `transform` maps.
    pub local_rect: Rect,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Outline width in local units.
    pub stroke_width: f64,
    /// Larger scale magnitude for `stretch` boundaries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_scalar: Option<f64>,
}

/// Transform of the group the scene is drawn inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParentTransform {
    /// Group matrix.
    pub matrix: Affine,
    /// Whether the group transform is already merged into each object's own.
    pub baked: bool,
}

/// Draw ops for one scene, bottom first.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct DrawList {
    /// Ops in painter's order.
    pub ops: Vec<DrawOp>,
}

/// Compile the scene into draw ops in painter's order.
///
/// Boundaries are drawn with their fit-clipped matrix; frames contribute only
/// their stroke, since the fitted image is a separate object.
#[tracing::instrument(skip(scene))]
pub fn compile_draw_list(scene: &Scene, parent: Option<ParentTransform>) -> DrawList {
    let unbaked = parent.filter(|p| !p.baked).map(|p| p.matrix);
    let ops = scene
        .objects()
        .iter()
        .filter(|o| o.opacity > 0.0)
        .map(|o| draw_op(o, unbaked))
        .collect();
    DrawList { ops }
}

fn draw_op(object: &SceneObject, unbaked: Option<Affine>) -> DrawOp {
    let own = object.geometry.matrix();
    let composed = unbaked.map_or(own, |p| p * own);
    let (kind, transform, effective_scalar) = match &object.shape {
        Shape::Rect => (DrawKind::Fill, composed, None),
        Shape::ImageFrame(_) => (DrawKind::Stroke, composed, None),
        Shape::Image(content) => (
            DrawKind::Image {
                src: content.src.clone(),
            },
            composed,
            None,
        ),
        Shape::ImageBoundary(boundary) => {
            let clipped = boundary.render_transform(&object.geometry, unbaked);
            (
                DrawKind::Image {
                    src: boundary.src.clone(),
                },
                clipped.matrix,
                clipped.effective_scalar,
            )
        }
    };
    DrawOp {
        id: object.id.clone(),
        kind,
        transform,
        local_rect: object.geometry.local_rect(),
        opacity: object.opacity,
        stroke_width: object.geometry.stroke_width,
        effective_scalar,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
