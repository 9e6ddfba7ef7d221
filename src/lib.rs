//! framefit keeps images fitted to frames inside an interactive 2D scene.
//!
//! A fit mode (`contain`, `fill`, `stretch`, `center`) decides how content of one
//! aspect ratio is scaled into a box of another. Two shape kinds realize it:
//!
//! - **`image-frame`** (dual-object): a container holds a weak, id-based
//!   reference to a separate child image and pushes its center, angle and
//!   fitted scale onto the child whenever the container moves, scales or
//!   rotates. See [`frame`].
//! - **`image-boundary`** (single-object): an image whose rendered matrix has
//!   its scale terms clipped to the fit mode at draw time. See
//!   [`compute_render_transform`].
//!
//! Both share [`resolve`] for the scale math.
//!
//! # Host model
//!
//! [`Scene`] is a minimal host: an ordered object collection, a synchronous
//! event hub ([`HandlerRegistry`]), an image load queue, and JSON documents.
//! Interactive edits ([`Scene::drag_by`], [`Scene::scale_to`], ...) emit
//! events; writes through [`Scene::get_mut`] are silent, which is how frame
//! sync avoids feedback loops.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod fit;
mod foundation;
mod render;
mod scene;

/// Single-object framed image (`image-boundary`).
pub mod boundary;
/// Dual-object framed image (`image-frame`) and its sync protocol.
pub mod frame;

pub use assets::loader::{FsImageLoader, ImageLoader, ImageOptions, LoadedImage, MemoryImageLoader};
pub use assets::queue::{LoadCompletion, LoadQueue, PendingLoad};
pub use boundary::clip::{ClippedTransform, compute_render_transform};
pub use boundary::{BOUNDARY_TYPE, ImageBoundary};
pub use fit::mode::FitMode;
pub use fit::resolver::{FitScale, resolve};
pub use foundation::core::{Affine, Geometry, Origin, Point, Rect, Vec2};
pub use foundation::error::{FramefitError, FramefitResult};
pub use frame::stacking::ZOrder;
pub use frame::sync::{
    ChildSource, attach_child, resolve_child, set_content_opacity, set_content_src,
    set_scaling_mode, update_position,
};
pub use frame::{FRAME_TYPE, FrameContent, ImageFrame};
pub use render::draw::{DrawKind, DrawList, DrawOp, ParentTransform, compile_draw_list};
pub use scene::events::{EventKind, Handler, HandlerRegistry, SceneEvent};
pub use scene::graph::{SCENE_DOCUMENT_VERSION, Scene, SceneDocument};
pub use scene::object::{ImageContent, ObjectId, SceneObject, Shape};
