use std::collections::VecDeque;

use crate::{
    assets::loader::{ImageLoader, ImageOptions, LoadedImage},
    foundation::error::FramefitResult,
    frame::sync,
    scene::{
        graph::Scene,
        object::{ObjectId, Shape},
    },
};

/// An image request waiting for its completion.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingLoad {
    /// Object that receives the image when the load completes.
    pub owner: ObjectId,
    /// Source to load.
    pub src: String,
    /// Options the load was requested with.
    pub options: ImageOptions,
}

/// Result of a load, delivered back to the scene exactly once.
#[derive(Debug)]
pub struct LoadCompletion {
    /// The request this completes.
    pub request: PendingLoad,
    /// Decoded image, or the loader error.
    pub result: FramefitResult<LoadedImage>,
}

/// FIFO of outstanding image requests.
#[derive(Clone, Debug, Default)]
pub struct LoadQueue {
    pending: VecDeque<PendingLoad>,
}

impl LoadQueue {
    /// Number of outstanding requests.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Outstanding requests, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PendingLoad> {
        self.pending.iter()
    }

    fn push(&mut self, load: PendingLoad) {
        self.pending.push_back(load);
    }

    fn pop(&mut self) -> Option<PendingLoad> {
        self.pending.pop_front()
    }
}

impl Scene {
    /// Requests not yet handed to a loader.
    pub fn pending_loads(&self) -> &LoadQueue {
        &self.loads
    }

    /// Queue an image load whose result is delivered to `owner`.
    pub fn request_image(&mut self, owner: ObjectId, src: impl Into<String>, options: ImageOptions) {
        self.loads.push(PendingLoad {
            owner,
            src: src.into(),
            options,
        });
    }

    /// Take the oldest pending request, for loaders that complete out of band
    /// and report back through [`Scene::complete_load`].
    pub fn take_pending_load(&mut self) -> Option<PendingLoad> {
        self.loads.pop()
    }

    /// Deliver a finished load.
    ///
    /// If the owner left the scene in the meantime this is a no-op returning
    /// `Ok(false)`, whatever the result was. Otherwise a load error is returned
    /// unchanged, and a decoded image is applied to the owner.
    pub fn complete_load(&mut self, completion: LoadCompletion) -> FramefitResult<bool> {
        let LoadCompletion { request, result } = completion;
        if !self.contains(&request.owner) {
            tracing::debug!(owner = %request.owner, src = %request.src, "owner gone; load dropped");
            return Ok(false);
        }
        let content = result?.into_content(&request.options);
        if self
            .get(&request.owner)
            .is_some_and(|o| o.shape.as_frame().is_some())
        {
            sync::apply_loaded(self, &request.owner, content)?;
            return Ok(true);
        }
        let Some(owner) = self.get_mut(&request.owner) else {
            return Ok(false);
        };

        match &mut owner.shape {
            Shape::ImageBoundary(boundary) => {
                owner
                    .geometry
                    .set_size(content.natural_width, content.natural_height);
                boundary.set_content(content);
            }
            Shape::Image(current) => {
                owner
                    .geometry
                    .set_size(content.natural_width, content.natural_height);
                *current = content;
            }
            Shape::Rect | Shape::ImageFrame(_) => {
                tracing::debug!(owner = %request.owner, "object cannot take image content");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Drain the queue through `loader` in request order.
    ///
    /// Stops at the first failed load and returns its error; that request is
    /// consumed and the rest stay queued. Returns how many loads were applied.
    #[tracing::instrument(skip(self, loader))]
    pub fn pump_loads(&mut self, loader: &mut dyn ImageLoader) -> FramefitResult<usize> {
        let mut applied = 0;
        while let Some(request) = self.loads.pop() {
            let result = loader.load_image(&request.src, &request.options);
            if self.complete_load(LoadCompletion { request, result })? {
                applied += 1;
            }
        }
        Ok(applied)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/queue.rs"]
mod tests;
