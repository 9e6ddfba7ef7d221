//! Image loading collaborator and the scene's pending-load queue.

pub(crate) mod loader;
pub(crate) mod queue;
