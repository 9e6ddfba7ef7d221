//! Draw-list compilation: the render-time view of a scene.

pub(crate) mod draw;
