//! Dual-object framed image: an `image-frame` container keeps a separate child
//! image positioned, rotated and fitted to its box.
//!
//! The container never owns its child. It persists only the child's id
//! (`childReferenceId`) and re-resolves it against the scene on demand, so
//! either object can be removed, reloaded or reordered independently.

pub(crate) mod stacking;
pub(crate) mod sync;

use crate::{
    fit::mode::FitMode,
    foundation::core::Geometry,
    scene::{
        events::{EventKind, Handler},
        graph::Scene,
        object::{ImageContent, ObjectId, SceneObject, Shape},
    },
};

/// `type` tag of frame records.
pub const FRAME_TYPE: &str = "image-frame";

/// Where a frame's child comes from before it has one.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameContent {
    /// Already decoded; a child is created from it on attach.
    Image(ImageContent),
    /// An object already in the scene, adopted as the child.
    Existing(ObjectId),
    /// Loaded through the scene's image queue; the child attaches on completion.
    Src(String),
}

/// Container state of an `image-frame` object.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFrame {
    /// How the child is fitted into the frame box.
    #[serde(default)]
    pub scaling_mode: FitMode,
    /// Weak reference to the child image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_reference_id: Option<ObjectId>,
    /// Last known collection index of the child; validated before every use.
    #[serde(skip)]
    pub(crate) child_slot: Option<usize>,
    /// Content to attach when the frame is added to a scene.
    #[serde(skip)]
    pub(crate) pending: Option<FrameContent>,
}

impl ImageFrame {
    /// Empty frame with no content.
    pub fn new(scaling_mode: FitMode) -> Self {
        Self {
            scaling_mode,
            ..Self::default()
        }
    }

    /// Content to attach once the frame is added to a scene.
    pub fn with_content(mut self, content: FrameContent) -> Self {
        self.pending = Some(content);
        self
    }

    /// Frame object ready to add to a scene.
    pub fn object(self, id: impl Into<ObjectId>, geometry: Geometry) -> SceneObject {
        SceneObject::new(id, Shape::ImageFrame(self), geometry)
    }

    /// Id of the linked child, if any.
    pub fn child_id(&self) -> Option<&ObjectId> {
        self.child_reference_id.as_ref()
    }

    /// Whether content is still waiting for the frame to be added.
    pub fn has_pending_content(&self) -> bool {
        self.pending.is_some()
    }

    /// Markup export. Frames have no static markup of their own; the optional
    /// reviver sees empty content.
    pub fn to_svg(&self, reviver: Option<&dyn Fn(&str) -> String>) -> String {
        match reviver {
            Some(revive) => revive(""),
            None => String::new(),
        }
    }

    pub(crate) fn unlink_slot(&mut self) {
        self.child_slot = None;
    }
}

/// Install the frame's event handlers into `scene`.
///
/// Returns `false` with a warning when frames are already registered; the
/// existing registration is kept.
pub fn register(scene: &mut Scene) -> bool {
    let handlers: [(EventKind, Handler); 5] = [
        (EventKind::Added, sync::on_added as Handler),
        (EventKind::Removed, sync::on_removed as Handler),
        (EventKind::Moving, sync::on_geometry_changed as Handler),
        (EventKind::Scaling, sync::on_geometry_changed as Handler),
        (EventKind::Rotating, sync::on_geometry_changed as Handler),
    ];
    if scene.register(FRAME_TYPE, &handlers) {
        return true;
    }
    tracing::warn!("{FRAME_TYPE} is already registered; keeping existing handlers");
    false
}

/// Resolve and resync every frame in the scene, e.g. right after loading a
/// document. Returns how many frames found their child.
#[tracing::instrument(skip(scene))]
pub fn relink_all(scene: &mut Scene) -> usize {
    let frames: Vec<ObjectId> = scene
        .objects()
        .iter()
        .filter(|o| o.shape.as_frame().is_some())
        .map(|o| o.id.clone())
        .collect();
    frames
        .iter()
        .filter(|id| sync::update_position(scene, id))
        .count()
}

#[cfg(test)]
#[path = "../../tests/unit/frame/mod.rs"]
mod tests;
