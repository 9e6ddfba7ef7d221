use std::collections::{BTreeMap, BTreeSet};

use crate::{
    foundation::error::FramefitResult,
    scene::{
        graph::Scene,
        object::{ObjectId, SceneObject},
    },
};

/// Lifecycle and geometry notifications a scene emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// An object entered the scene.
    Added,
    /// An object left the scene.
    Removed,
    /// An object is being dragged.
    Moving,
    /// An object's scale or box size changed.
    Scaling,
    /// An object's angle changed.
    Rotating,
}

/// Event payload handed to handlers.
///
/// `Removed` carries the detached object itself, since it is no longer reachable
/// through the scene when handlers run.
#[derive(Clone, Debug)]
pub enum SceneEvent {
    /// Id of the inserted object.
    Added(ObjectId),
    /// The detached object.
    Removed(Box<SceneObject>),
    /// Id of the dragged object.
    Moving(ObjectId),
    /// Id of the scaled or resized object.
    Scaling(ObjectId),
    /// Id of the rotated object.
    Rotating(ObjectId),
}

impl SceneEvent {
    /// Kind used to look up handlers.
    pub fn kind(&self) -> EventKind {
        match self {
            SceneEvent::Added(_) => EventKind::Added,
            SceneEvent::Removed(_) => EventKind::Removed,
            SceneEvent::Moving(_) => EventKind::Moving,
            SceneEvent::Scaling(_) => EventKind::Scaling,
            SceneEvent::Rotating(_) => EventKind::Rotating,
        }
    }

    /// Id of the object the event is about.
    pub fn target(&self) -> &ObjectId {
        match self {
            SceneEvent::Added(id)
            | SceneEvent::Moving(id)
            | SceneEvent::Scaling(id)
            | SceneEvent::Rotating(id) => id,
            SceneEvent::Removed(obj) => &obj.id,
        }
    }
}

/// Event callback. Runs synchronously inside the emitting scene call.
pub type Handler = fn(&mut Scene, &SceneEvent) -> FramefitResult<()>;

#[derive(Clone, Copy, Debug)]
struct Binding {
    owner: &'static str,
    handler: Handler,
}

/// Handlers keyed by event kind, invoked in registration order.
#[derive(Clone, Debug, Default)]
pub struct HandlerRegistry {
    bindings: BTreeMap<EventKind, Vec<Binding>>,
    owners: BTreeSet<&'static str>,
}

impl HandlerRegistry {
    /// Whether `owner` has registered its handlers.
    pub fn is_registered(&self, owner: &str) -> bool {
        self.owners.contains(owner)
    }

    /// Register a shape type's handlers as one unit.
    ///
    /// Returns `false` and leaves the registry untouched if `owner` is already
    /// registered.
    pub fn register(&mut self, owner: &'static str, handlers: &[(EventKind, Handler)]) -> bool {
        if !self.owners.insert(owner) {
            return false;
        }
        for &(kind, handler) in handlers {
            self.on(kind, owner, handler);
        }
        true
    }

    /// Bind one handler for `kind` on behalf of `owner`.
    pub fn on(&mut self, kind: EventKind, owner: &'static str, handler: Handler) {
        self.bindings
            .entry(kind)
            .or_default()
            .push(Binding { owner, handler });
    }

    /// Handlers bound to `kind`.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.bindings.get(&kind).map_or(0, Vec::len)
    }

    // Copied out so handlers may re-enter the scene mutably.
    pub(crate) fn handlers_for(&self, kind: EventKind) -> Vec<Handler> {
        self.bindings
            .get(&kind)
            .map(|v| v.iter().map(|b| b.handler).collect())
            .unwrap_or_default()
    }

    /// Owners of the handlers bound to `kind`, in call order.
    pub fn owners_for(&self, kind: EventKind) -> Vec<&'static str> {
        self.bindings
            .get(&kind)
            .map(|v| v.iter().map(|b| b.owner).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/events.rs"]
mod tests;
