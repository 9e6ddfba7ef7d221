use crate::{
    foundation::error::{FramefitError, FramefitResult},
    frame::sync::resolve_child,
    scene::{graph::Scene, object::ObjectId},
};

/// Stacking-order operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZOrder {
    /// Topmost.
    Front,
    /// Bottommost.
    Back,
    /// One step up.
    Forward,
    /// One step down.
    Backward,
}

/// Reorder `id`, carrying a frame's child along so it stays directly above
/// the frame. Runs entirely inside one `&mut Scene` borrow, so no reader can
/// observe the frame without its child. Returns the object's final index.
pub(crate) fn reorder(scene: &mut Scene, id: &ObjectId, op: ZOrder) -> FramefitResult<usize> {
    if !scene.contains(id) {
        return Err(FramefitError::validation(format!("no object with id '{id}'")));
    }

    let detached = match resolve_child(scene, id) {
        Some(slot) => {
            let child_id = scene.objects()[slot].id.clone();
            Some(scene.remove_silent(&child_id)?)
        }
        None => None,
    };
    unlink(scene, id);

    let index = scene
        .index_of(id)
        .ok_or_else(|| FramefitError::validation(format!("no object with id '{id}'")))?;
    let target = match op {
        ZOrder::Front => scene.len().saturating_sub(1),
        ZOrder::Back => 0,
        ZOrder::Forward => forward_target(scene, index),
        ZOrder::Backward => backward_target(scene, index),
    };
    let index = scene.move_to_index(id, target)?;

    if let Some(child) = detached {
        scene.insert_silent(index + 1, child)?;
    }
    resolve_child(scene, id);
    Ok(index)
}

// Past the next object, and past that object's child if it is a linked frame.
fn forward_target(scene: &Scene, index: usize) -> usize {
    let next = index + 1;
    if next >= scene.len() {
        return index;
    }
    if is_linked_pair(scene, next, next + 1) {
        next + 1
    } else {
        next
    }
}

// Below the previous object, or below its frame if it is a linked child.
fn backward_target(scene: &Scene, index: usize) -> usize {
    let Some(prev) = index.checked_sub(1) else {
        return 0;
    };
    match prev.checked_sub(1) {
        Some(frame) if is_linked_pair(scene, frame, prev) => frame,
        _ => prev,
    }
}

fn is_linked_pair(scene: &Scene, frame: usize, child: usize) -> bool {
    let objects = scene.objects();
    match (objects.get(frame), objects.get(child)) {
        (Some(f), Some(c)) => f
            .shape
            .as_frame()
            .and_then(|f| f.child_reference_id.as_ref())
            .is_some_and(|cid| cid == &c.id),
        _ => false,
    }
}

fn unlink(scene: &mut Scene, id: &ObjectId) {
    if let Some(frame) = scene.get_mut(id).and_then(|o| o.shape.as_frame_mut()) {
        frame.unlink_slot();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/stacking.rs"]
mod tests;
