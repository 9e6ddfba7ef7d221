//! Minimal host scene graph: an ordered object collection with a synchronous
//! event hub. Framed shapes plug into it through [`events::HandlerRegistry`].

pub(crate) mod events;
pub(crate) mod graph;
pub(crate) mod object;
