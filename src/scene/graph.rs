use std::collections::BTreeMap;

use crate::{
    assets::queue::LoadQueue,
    foundation::core::{Point, Vec2},
    foundation::error::{FramefitError, FramefitResult},
    frame::stacking::{self, ZOrder},
    scene::{
        events::{EventKind, Handler, HandlerRegistry, SceneEvent},
        object::{ObjectId, SceneObject},
    },
};

/// Current scene document version.
pub const SCENE_DOCUMENT_VERSION: u32 = 1;

/// Persisted form of a [`Scene`]: objects in painter's order.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SceneDocument {
    /// Always [`SCENE_DOCUMENT_VERSION`] when written.
    pub version: u32,
    /// Objects in painter's order.
    pub objects: Vec<SceneObject>,
}

/// Ordered object collection plus event hub.
///
/// Index 0 is drawn first (bottom). All mutation is synchronous; handlers run
/// inside the call that emitted their event. Writes through [`Scene::get_mut`]
/// are silent and never emit events.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    registry: HandlerRegistry,
    pub(crate) loads: LoadQueue,
    /// Children cascaded out with their frame, keyed by frame id, kept so the
    /// frame can bring them back when it is added again.
    pub(crate) detached: BTreeMap<ObjectId, SceneObject>,
    next_id: u64,
}

impl Scene {
    /// Empty scene with no handlers registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered event handlers.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Register a shape type's handlers. See [`HandlerRegistry::register`].
    pub fn register(&mut self, owner: &'static str, handlers: &[(EventKind, Handler)]) -> bool {
        self.registry.register(owner, handlers)
    }

    /// Bind a single handler. See [`HandlerRegistry::on`].
    pub fn on(&mut self, kind: EventKind, owner: &'static str, handler: Handler) {
        self.registry.on(kind, owner, handler);
    }

    /// Objects bottom to top.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Collection index of `id`.
    pub fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| &o.id == id)
    }

    /// Whether an object with `id` is in the scene.
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    /// Object with `id`, if present.
    pub fn get(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    /// Silent mutable access: no events are emitted for changes made here.
    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| &o.id == id)
    }

    pub(crate) fn object_at_mut(&mut self, index: usize) -> Option<&mut SceneObject> {
        self.objects.get_mut(index)
    }

    /// A fresh id of the form `{prefix}-{n}` not used by any object in the scene.
    pub fn allocate_id(&mut self, prefix: &str) -> ObjectId {
        loop {
            self.next_id += 1;
            let id = ObjectId::new(format!("{prefix}-{}", self.next_id));
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Append `object` on top and emit [`SceneEvent::Added`].
    pub fn add(&mut self, object: SceneObject) -> FramefitResult<ObjectId> {
        let index = self.objects.len();
        self.insert_at(index, object)
    }

    /// Insert `object` at `index` (clamped to the collection) and emit
    /// [`SceneEvent::Added`]. An empty id is replaced with a fresh one.
    pub fn insert_at(&mut self, index: usize, object: SceneObject) -> FramefitResult<ObjectId> {
        let id = self.insert_silent(index, object)?;
        self.emit(SceneEvent::Added(id.clone()))?;
        Ok(id)
    }

    pub(crate) fn insert_silent(
        &mut self,
        index: usize,
        mut object: SceneObject,
    ) -> FramefitResult<ObjectId> {
        if object.id.is_empty() {
            object.id = self.allocate_id(object.shape.type_name());
        } else if self.contains(&object.id) {
            return Err(FramefitError::validation(format!(
                "object id '{}' is already in the scene",
                object.id
            )));
        }
        let id = object.id.clone();
        let index = index.min(self.objects.len());
        self.objects.insert(index, object);
        Ok(id)
    }

    /// Detach `id` and emit [`SceneEvent::Removed`] carrying the detached object.
    pub fn remove(&mut self, id: &ObjectId) -> FramefitResult<SceneObject> {
        let object = self.remove_silent(id)?;
        self.emit(SceneEvent::Removed(Box::new(object.clone())))?;
        Ok(object)
    }

    pub(crate) fn remove_silent(&mut self, id: &ObjectId) -> FramefitResult<SceneObject> {
        let index = self
            .index_of(id)
            .ok_or_else(|| FramefitError::validation(format!("no object with id '{id}'")))?;
        Ok(self.objects.remove(index))
    }

    /// Base reorder: take `id` out and reinsert it at `index` (clamped).
    /// Returns the resulting index. Emits nothing.
    pub fn move_to_index(&mut self, id: &ObjectId, index: usize) -> FramefitResult<usize> {
        let object = self.remove_silent(id)?;
        let index = index.min(self.objects.len());
        self.objects.insert(index, object);
        Ok(index)
    }

    /// Dispatch `event` to every handler bound to its kind, in registration order.
    pub fn emit(&mut self, event: SceneEvent) -> FramefitResult<()> {
        for handler in self.registry.handlers_for(event.kind()) {
            handler(self, &event)?;
        }
        Ok(())
    }

    /// Interactive move by `delta`; emits [`SceneEvent::Moving`].
    pub fn drag_by(&mut self, id: &ObjectId, delta: Vec2) -> FramefitResult<()> {
        let object = self.require_mut(id)?;
        object.geometry.left += delta.x;
        object.geometry.top += delta.y;
        self.emit(SceneEvent::Moving(id.clone()))
    }

    /// Interactive scale; emits [`SceneEvent::Scaling`].
    pub fn scale_to(&mut self, id: &ObjectId, scale_x: f64, scale_y: f64) -> FramefitResult<()> {
        let object = self.require_mut(id)?;
        object.geometry.scale_x = scale_x;
        object.geometry.scale_y = scale_y;
        self.emit(SceneEvent::Scaling(id.clone()))
    }

    /// Interactive box resize; reported as [`SceneEvent::Scaling`].
    pub fn resize_to(&mut self, id: &ObjectId, width: f64, height: f64) -> FramefitResult<()> {
        self.require_mut(id)?.geometry.set_size(width, height);
        self.emit(SceneEvent::Scaling(id.clone()))
    }

    /// Interactive rotation to `angle` degrees; emits [`SceneEvent::Rotating`].
    pub fn rotate_to(&mut self, id: &ObjectId, angle: f64) -> FramefitResult<()> {
        self.require_mut(id)?.geometry.angle = angle;
        self.emit(SceneEvent::Rotating(id.clone()))
    }

    /// Move `id` to the top. A frame takes its child along.
    pub fn bring_to_front(&mut self, id: &ObjectId) -> FramefitResult<usize> {
        stacking::reorder(self, id, ZOrder::Front)
    }

    /// Move `id` to the bottom. A frame takes its child along.
    pub fn send_to_back(&mut self, id: &ObjectId) -> FramefitResult<usize> {
        stacking::reorder(self, id, ZOrder::Back)
    }

    /// Step `id` one place up, over a whole frame/child pair if one is next.
    pub fn bring_forward(&mut self, id: &ObjectId) -> FramefitResult<usize> {
        stacking::reorder(self, id, ZOrder::Forward)
    }

    /// Step `id` one place down, under a whole frame/child pair if one is below.
    pub fn send_backwards(&mut self, id: &ObjectId) -> FramefitResult<usize> {
        stacking::reorder(self, id, ZOrder::Backward)
    }

    /// Topmost pointer-interactive object whose box contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<&ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.evented && o.geometry.contains_point(point))
            .map(|o| &o.id)
    }

    /// Snapshot the scene as a persistable document.
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument {
            version: SCENE_DOCUMENT_VERSION,
            objects: self.objects.clone(),
        }
    }

    /// Rebuild a scene from a document without emitting any events.
    ///
    /// Frames come back unlinked; their children are found again lazily by id.
    pub fn from_document(doc: SceneDocument) -> FramefitResult<Self> {
        if doc.version != SCENE_DOCUMENT_VERSION {
            return Err(FramefitError::validation(format!(
                "unsupported scene document version {} (expected {SCENE_DOCUMENT_VERSION})",
                doc.version
            )));
        }
        let mut scene = Self::new();
        for object in doc.objects {
            let index = scene.objects.len();
            scene.insert_silent(index, object)?;
        }
        Ok(scene)
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> FramefitResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Load a JSON document. See [`Scene::from_document`].
    pub fn from_json(s: &str) -> FramefitResult<Self> {
        let doc: SceneDocument = serde_json::from_str(s)?;
        Self::from_document(doc)
    }

    fn require_mut(&mut self, id: &ObjectId) -> FramefitResult<&mut SceneObject> {
        self.get_mut(id)
            .ok_or_else(|| FramefitError::validation(format!("no object with id '{id}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
