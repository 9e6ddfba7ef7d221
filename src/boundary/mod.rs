//! Single-object framed image: an `image-boundary` draws its own bitmap and
//! realizes the fit mode by clipping the rendered matrix's scale terms.

pub(crate) mod clip;

use crate::{
    fit::mode::FitMode,
    foundation::core::{Affine, Geometry, Origin},
    scene::{
        graph::Scene,
        object::{ImageContent, ObjectId, SceneObject, Shape},
    },
};

/// `type` tag of boundary records.
pub const BOUNDARY_TYPE: &str = "image-boundary";

/// Single-object framed image: draws its bitmap with a fit-clipped matrix.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBoundary {
    /// How the drawn matrix is clipped.
    #[serde(default)]
    pub scaling_mode: FitMode,
    /// Image source.
    #[serde(default)]
    pub src: String,
    /// Intrinsic width.
    pub natural_width: f64,
    /// Intrinsic height.
    pub natural_height: f64,
}

impl ImageBoundary {
    /// Boundary showing `content` under `scaling_mode`.
    pub fn new(content: ImageContent, scaling_mode: FitMode) -> Self {
        Self {
            scaling_mode,
            src: content.src,
            natural_width: content.natural_width,
            natural_height: content.natural_height,
        }
    }

    /// Current image content.
    pub fn content(&self) -> ImageContent {
        ImageContent::new(self.src.clone(), self.natural_width, self.natural_height)
    }

    /// Replace the image content. Geometry is left to the caller.
    pub fn set_content(&mut self, content: ImageContent) {
        self.src = content.src;
        self.natural_width = content.natural_width;
        self.natural_height = content.natural_height;
    }

    /// Boundary object centered at `(center_x, center_y)`, boxed at natural size.
    pub fn object(self, id: impl Into<ObjectId>, center_x: f64, center_y: f64) -> SceneObject {
        let mut geometry = Geometry::new(center_x, center_y, self.natural_width, self.natural_height);
        geometry.origin = Origin::Center;
        SceneObject::new(id, Shape::ImageBoundary(self), geometry)
    }

    /// Matrix to draw with, given the object's geometry and an optional
    /// not-yet-baked parent transform.
    pub fn render_transform(&self, geometry: &Geometry, parent: Option<Affine>) -> clip::ClippedTransform {
        let own = geometry.matrix();
        let effective = parent.map_or(own, |p| p * own);
        clip::compute_render_transform(self.scaling_mode, own, effective, parent.is_some())
    }
}

/// Register the boundary shape type. Boundaries need no event bindings; the
/// registration only guards against double initialization.
pub fn register(scene: &mut Scene) -> bool {
    if scene.register(BOUNDARY_TYPE, &[]) {
        return true;
    }
    tracing::warn!("{BOUNDARY_TYPE} is already registered; keeping existing handlers");
    false
}

#[cfg(test)]
#[path = "../../tests/unit/boundary/mod.rs"]
mod tests;
