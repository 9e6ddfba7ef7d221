use crate::{
    fit::{mode::FitMode, resolver::uniform_magnitude},
    foundation::core::Affine,
};

/// Render matrix after fit-mode clipping.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClippedTransform {
    /// Matrix to draw with.
    pub matrix: Affine,
    /// Larger scale magnitude, recorded for `stretch` only. Renderers may use it
    /// for scale-aware stroke width or resolution choices.
    pub effective_scalar: Option<f64>,
}

/// Clip the composed matrix of an image to `mode`.
///
/// `effective` (accumulated with ancestor groups) is used when the object sits
/// in a group whose transform has not been baked in, `own` otherwise. The x/y
/// scale terms (coefficients 0 and 3) are then equalized by magnitude:
/// `fill` takes the larger, `contain` the smaller, `center` the smaller capped
/// at 1. Each term keeps its sign, so mirrored images stay mirrored. `stretch`
/// leaves the matrix alone.
pub fn compute_render_transform(
    mode: FitMode,
    own: Affine,
    effective: Affine,
    in_unbaked_group: bool,
) -> ClippedTransform {
    let base = if in_unbaked_group { effective } else { own };
    let mut m = base.as_coeffs();
    match uniform_magnitude(mode, m[0], m[3]) {
        Some(magnitude) => {
            m[0] = magnitude.copysign(m[0]);
            m[3] = magnitude.copysign(m[3]);
            ClippedTransform {
                matrix: Affine::new(m),
                effective_scalar: None,
            }
        }
        None => ClippedTransform {
            matrix: base,
            effective_scalar: Some(m[0].abs().max(m[3].abs())),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/boundary/clip.rs"]
mod tests;
