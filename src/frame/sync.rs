use crate::{
    assets::loader::ImageOptions,
    fit::{mode::FitMode, resolver::resolve},
    foundation::core::Origin,
    foundation::error::{FramefitError, FramefitResult},
    frame::{FrameContent, ImageFrame},
    scene::{
        events::SceneEvent,
        graph::Scene,
        object::{ImageContent, ObjectId, SceneObject, Shape},
    },
};

/// Content handed to [`attach_child`].
#[derive(Clone, Debug, PartialEq)]
pub enum ChildSource {
    /// Build a new image object from decoded content.
    Image(ImageContent),
    /// Adopt an object that is already in the scene.
    Existing(ObjectId),
}

fn frame_mut<'a>(scene: &'a mut Scene, frame_id: &ObjectId) -> FramefitResult<&'a mut ImageFrame> {
    scene
        .get_mut(frame_id)
        .and_then(|o| o.shape.as_frame_mut())
        .ok_or_else(|| FramefitError::validation(format!("'{frame_id}' is not an image frame")))
}

/// Find the frame's child in the scene collection.
///
/// A cached slot is reused only if the object there still carries the child
/// id; otherwise the child is looked up by id and the slot re-cached. `None`
/// means the frame has no child reference or the scene does not hold it (yet).
pub fn resolve_child(scene: &mut Scene, frame_id: &ObjectId) -> Option<usize> {
    let frame_idx = scene.index_of(frame_id)?;
    let frame = scene.objects()[frame_idx].shape.as_frame()?;
    let child_id = frame.child_reference_id.clone()?;
    if let Some(slot) = frame.child_slot {
        if scene.objects().get(slot).is_some_and(|o| o.id == child_id) {
            return Some(slot);
        }
    }

    let found = scene.index_of(&child_id).filter(|&i| i != frame_idx);
    if let Some(frame) = scene
        .object_at_mut(frame_idx)
        .and_then(|o| o.shape.as_frame_mut())
    {
        frame.child_slot = found;
    }
    found
}

/// Push the frame's center, angle and fitted scale onto its child.
///
/// Writes are silent, so no event handler fires for the child. Returns `false`
/// without touching anything when the frame or its child cannot be resolved.
#[tracing::instrument(skip(scene))]
pub fn update_position(scene: &mut Scene, frame_id: &ObjectId) -> bool {
    let Some(child_idx) = resolve_child(scene, frame_id) else {
        tracing::debug!(frame = %frame_id, "child unresolved; sync skipped");
        return false;
    };
    let Some(container) = scene.get(frame_id) else {
        return false;
    };
    let Some(mode) = container.shape.as_frame().map(|f| f.scaling_mode) else {
        return false;
    };
    let geometry = container.geometry;
    let (target_w, target_h) = geometry.scaled_size();

    let Some(child) = scene.object_at_mut(child_idx) else {
        return false;
    };
    let (natural_w, natural_h) = child.natural_size();
    let scale = resolve(target_w, target_h, natural_w, natural_h, mode);

    child.geometry.origin = Origin::Center;
    child.geometry.angle = geometry.angle;
    child.geometry.scale_x = scale.x;
    child.geometry.scale_y = scale.y;
    child.geometry.set_center(geometry.center());
    true
}

/// Link `source` as the frame's child, directly above the frame, and sync it.
///
/// The child is made non-interactive and center-anchored. A previously linked
/// child is removed from the scene.
#[tracing::instrument(skip(scene, source))]
pub fn attach_child(
    scene: &mut Scene,
    frame_id: &ObjectId,
    source: ChildSource,
) -> FramefitResult<ObjectId> {
    let previous = frame_mut(scene, frame_id)?.child_reference_id.clone();

    let child_id = match source {
        ChildSource::Image(content) => {
            let id = scene.allocate_id("image");
            let mut child = SceneObject::image(id.clone(), content, 0.0, 0.0);
            child.evented = false;
            link(scene, frame_id, &id)?;
            let frame_idx = scene
                .index_of(frame_id)
                .ok_or_else(|| FramefitError::validation(format!("no object with id '{frame_id}'")))?;
            scene.insert_at(frame_idx + 1, child)?;
            id
        }
        ChildSource::Existing(id) => {
            if &id == frame_id {
                return Err(FramefitError::validation(format!(
                    "frame '{frame_id}' cannot be its own child"
                )));
            }
            let child_idx = scene
                .index_of(&id)
                .ok_or_else(|| FramefitError::validation(format!("no object with id '{id}'")))?;
            if let Some(owner) = owning_frame(scene, &id, frame_id) {
                return Err(FramefitError::validation(format!(
                    "'{id}' is already the child of frame '{owner}'"
                )));
            }
            let frame_idx = scene
                .index_of(frame_id)
                .ok_or_else(|| FramefitError::validation(format!("no object with id '{frame_id}'")))?;
            let target = if child_idx > frame_idx {
                frame_idx + 1
            } else {
                frame_idx
            };
            scene.move_to_index(&id, target)?;
            if let Some(child) = scene.get_mut(&id) {
                child.evented = false;
                let center = child.geometry.center();
                child.geometry.origin = Origin::Center;
                child.geometry.set_center(center);
            }
            link(scene, frame_id, &id)?;
            id
        }
    };

    if let Some(prev) = previous.filter(|p| p != &child_id) {
        if scene.contains(&prev) {
            scene.remove(&prev)?;
        }
    }

    update_position(scene, frame_id);
    Ok(child_id)
}

// Another frame in the scene that links `child_id`, if any.
fn owning_frame(scene: &Scene, child_id: &ObjectId, except: &ObjectId) -> Option<ObjectId> {
    scene
        .objects()
        .iter()
        .filter(|o| &o.id != except)
        .find(|o| {
            o.shape
                .as_frame()
                .and_then(ImageFrame::child_id)
                .is_some_and(|c| c == child_id)
        })
        .map(|o| o.id.clone())
}

fn link(scene: &mut Scene, frame_id: &ObjectId, child_id: &ObjectId) -> FramefitResult<()> {
    let frame = frame_mut(scene, frame_id)?;
    frame.child_reference_id = Some(child_id.clone());
    frame.unlink_slot();
    frame.pending = None;
    Ok(())
}

/// Change the fit mode and resync.
pub fn set_scaling_mode(
    scene: &mut Scene,
    frame_id: &ObjectId,
    mode: FitMode,
) -> FramefitResult<bool> {
    frame_mut(scene, frame_id)?.scaling_mode = mode;
    Ok(update_position(scene, frame_id))
}

/// Forward opacity to the child. No-op while the child is unresolved.
pub fn set_content_opacity(scene: &mut Scene, frame_id: &ObjectId, opacity: f64) -> bool {
    let Some(child_idx) = resolve_child(scene, frame_id) else {
        return false;
    };
    match scene.object_at_mut(child_idx) {
        Some(child) => {
            child.opacity = opacity.clamp(0.0, 1.0);
            true
        }
        None => false,
    }
}

/// Queue a reload of the frame's image from `src`. The child is created or
/// updated when the load completes.
pub fn set_content_src(
    scene: &mut Scene,
    frame_id: &ObjectId,
    src: impl Into<String>,
    options: ImageOptions,
) -> FramefitResult<()> {
    frame_mut(scene, frame_id)?;
    scene.request_image(frame_id.clone(), src, options);
    Ok(())
}

/// Load completion for a frame: refresh the linked child, or attach a new one.
pub(crate) fn apply_loaded(
    scene: &mut Scene,
    frame_id: &ObjectId,
    content: ImageContent,
) -> FramefitResult<()> {
    if let Some(child_idx) = resolve_child(scene, frame_id) {
        if let Some(child) = scene.object_at_mut(child_idx) {
            if let Shape::Image(current) = &mut child.shape {
                child.geometry.set_size(content.natural_width, content.natural_height);
                *current = content;
                update_position(scene, frame_id);
                return Ok(());
            }
        }
    }
    attach_child(scene, frame_id, ChildSource::Image(content))?;
    Ok(())
}

pub(crate) fn on_added(scene: &mut Scene, event: &SceneEvent) -> FramefitResult<()> {
    let frame_id = event.target();
    let Some(frame) = scene.get_mut(frame_id).and_then(|o| o.shape.as_frame_mut()) else {
        return Ok(());
    };
    frame.unlink_slot();
    let linked = frame.child_reference_id.clone();
    let pending = frame.pending.take();
    let detached = scene.detached.remove(frame_id);

    if let Some(child_id) = linked {
        if let Some(child) = detached.filter(|c| c.id == child_id) {
            restore_child(scene, frame_id, child)?;
        }
        update_position(scene, frame_id);
        return Ok(());
    }
    match pending {
        Some(FrameContent::Image(content)) => {
            attach_child(scene, frame_id, ChildSource::Image(content))?;
        }
        Some(FrameContent::Existing(id)) => {
            attach_child(scene, frame_id, ChildSource::Existing(id))?;
        }
        Some(FrameContent::Src(src)) => {
            scene.request_image(frame_id.clone(), src, ImageOptions::default());
        }
        None => {}
    }
    Ok(())
}

pub(crate) fn on_removed(scene: &mut Scene, event: &SceneEvent) -> FramefitResult<()> {
    let SceneEvent::Removed(object) = event else {
        return Ok(());
    };
    let Some(child_id) = object.shape.as_frame().and_then(|f| f.child_reference_id.as_ref()) else {
        return Ok(());
    };
    if scene.contains(child_id) {
        let child = scene.remove(child_id)?;
        scene.detached.insert(object.id.clone(), child);
    }
    Ok(())
}

// Put a child that left together with its frame back directly above it.
fn restore_child(scene: &mut Scene, frame_id: &ObjectId, child: SceneObject) -> FramefitResult<()> {
    if scene.contains(&child.id) {
        tracing::debug!(frame = %frame_id, child = %child.id, "child id taken; not restored");
        return Ok(());
    }
    let frame_idx = scene
        .index_of(frame_id)
        .ok_or_else(|| FramefitError::validation(format!("no object with id '{frame_id}'")))?;
    scene.insert_at(frame_idx + 1, child)?;
    Ok(())
}

pub(crate) fn on_geometry_changed(scene: &mut Scene, event: &SceneEvent) -> FramefitResult<()> {
    let frame_id = event.target();
    if scene.get(frame_id).is_some_and(|o| o.shape.as_frame().is_some()) {
        update_position(scene, frame_id);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/frame/sync.rs"]
mod tests;
