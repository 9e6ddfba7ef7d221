use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    foundation::error::{FramefitError, FramefitResult},
    scene::object::ImageContent,
};

/// Per-request load options.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    /// Device pixels per scene unit; natural size is pixel size divided by this.
    pub pixel_ratio: f64,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self { pixel_ratio: 1.0 }
    }
}

/// A decoded image's identity and pixel dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedImage {
    /// Source the image was loaded from.
    pub src: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl LoadedImage {
    /// Scene-space content for this image under `options`.
    pub fn into_content(self, options: &ImageOptions) -> ImageContent {
        let ratio = if options.pixel_ratio.is_finite() && options.pixel_ratio > 0.0 {
            options.pixel_ratio
        } else {
            1.0
        };
        ImageContent::new(
            self.src,
            f64::from(self.width) / ratio,
            f64::from(self.height) / ratio,
        )
    }
}

/// Resolves an image source to its decoded dimensions.
pub trait ImageLoader {
    /// Decode `src` far enough to know its pixel dimensions.
    fn load_image(&mut self, src: &str, options: &ImageOptions) -> FramefitResult<LoadedImage>;
}

/// Loads images from files relative to a root directory.
#[derive(Clone, Debug)]
pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    /// Loader rooted at `root`; sources are joined onto it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory sources are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageLoader for FsImageLoader {
    fn load_image(&mut self, src: &str, _options: &ImageOptions) -> FramefitResult<LoadedImage> {
        let path = self.root.join(src);
        let reader = image::ImageReader::open(&path)
            .with_context(|| format!("open image '{}'", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("sniff image format '{}'", path.display()))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| FramefitError::load(format!("{}: {e}", path.display())))?;
        Ok(LoadedImage {
            src: src.to_string(),
            width,
            height,
        })
    }
}

/// Decodes encoded image bytes registered under a source key.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageLoader {
    images: HashMap<String, Vec<u8>>,
}

impl MemoryImageLoader {
    /// Empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register encoded image `bytes` under `src`, replacing any previous entry.
    pub fn insert(&mut self, src: impl Into<String>, bytes: Vec<u8>) {
        self.images.insert(src.into(), bytes);
    }
}

impl ImageLoader for MemoryImageLoader {
    fn load_image(&mut self, src: &str, _options: &ImageOptions) -> FramefitResult<LoadedImage> {
        let bytes = self
            .images
            .get(src)
            .ok_or_else(|| FramefitError::load(format!("no image registered for '{src}'")))?;
        let img = image::load_from_memory(bytes)
            .map_err(|e| FramefitError::load(format!("{src}: {e}")))?;
        Ok(LoadedImage {
            src: src.to_string(),
            width: img.width(),
            height: img.height(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
