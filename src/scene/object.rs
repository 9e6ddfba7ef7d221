use std::fmt;

use crate::{
    boundary::ImageBoundary,
    foundation::core::{Geometry, Origin},
    frame::ImageFrame,
};

/// Stable identifier of a scene object; the only link persisted between objects.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wrap a raw id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is still unassigned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Decoded image resource: where it came from and its intrinsic size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    /// Source locator handed to the image loader.
    #[serde(default)]
    pub src: String,
    /// Intrinsic width, independent of any applied scale.
    pub natural_width: f64,
    /// Intrinsic height, independent of any applied scale.
    pub natural_height: f64,
}

impl ImageContent {
    /// Content with negative natural sizes clamped to 0.
    pub fn new(src: impl Into<String>, natural_width: f64, natural_height: f64) -> Self {
        Self {
            src: src.into(),
            natural_width: natural_width.max(0.0),
            natural_height: natural_height.max(0.0),
        }
    }
}

/// What an object draws. Serialized as the `type` tag of the object record.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Shape {
    /// Plain filled box.
    Rect,
    /// Bitmap drawn at its geometry.
    Image(ImageContent),
    /// Container that keeps a separate child image fitted to its box.
    ImageFrame(ImageFrame),
    /// Image whose rendered matrix is clipped to a fit mode at draw time.
    ImageBoundary(ImageBoundary),
}

impl Shape {
    /// The record's `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Rect => "rect",
            Shape::Image(_) => "image",
            Shape::ImageFrame(_) => crate::frame::FRAME_TYPE,
            Shape::ImageBoundary(_) => crate::boundary::BOUNDARY_TYPE,
        }
    }

    /// Frame state, if this is an `image-frame`.
    pub fn as_frame(&self) -> Option<&ImageFrame> {
        match self {
            Shape::ImageFrame(f) => Some(f),
            _ => None,
        }
    }

    /// Mutable frame state, if this is an `image-frame`.
    pub fn as_frame_mut(&mut self) -> Option<&mut ImageFrame> {
        match self {
            Shape::ImageFrame(f) => Some(f),
            _ => None,
        }
    }
}

/// One entry of the scene collection.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    /// Unique within a scene. Empty ids are assigned on insertion.
    #[serde(default)]
    pub id: ObjectId,
    /// Shape-specific state.
    #[serde(flatten)]
    pub shape: Shape,
    /// Placement in the scene.
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Whether pointer hit-testing may pick this object.
    #[serde(default = "default_evented")]
    pub evented: bool,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_evented() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

impl SceneObject {
    /// Object with the given shape and geometry, interactive and opaque.
    pub fn new(id: impl Into<ObjectId>, shape: Shape, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            shape,
            geometry,
            evented: true,
            opacity: 1.0,
        }
    }

    /// Plain rectangle.
    pub fn rect(id: impl Into<ObjectId>, geometry: Geometry) -> Self {
        Self::new(id, Shape::Rect, geometry)
    }

    /// Image object sized to its natural dimensions, anchored at its center.
    pub fn image(id: impl Into<ObjectId>, content: ImageContent, center_x: f64, center_y: f64) -> Self {
        let mut geometry = Geometry::new(
            center_x,
            center_y,
            content.natural_width,
            content.natural_height,
        );
        geometry.origin = Origin::Center;
        Self::new(id, Shape::Image(content), geometry)
    }

    /// Natural content size: the decoded image size for images, the box otherwise.
    pub fn natural_size(&self) -> (f64, f64) {
        match &self.shape {
            Shape::Image(c) => (c.natural_width, c.natural_height),
            Shape::ImageBoundary(b) => (b.natural_width, b.natural_height),
            Shape::Rect | Shape::ImageFrame(_) => (self.geometry.width, self.geometry.height),
        }
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/object.rs"]
mod tests;
