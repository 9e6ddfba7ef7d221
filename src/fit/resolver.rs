use crate::fit::mode::FitMode;

/// Per-axis scale factors produced by [`resolve`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitScale {
    /// Horizontal scale factor.
    pub x: f64,
    /// Vertical scale factor.
    pub y: f64,
}

impl FitScale {
    /// Zero scale: content not renderable yet.
    pub const ZERO: FitScale = FitScale { x: 0.0, y: 0.0 };

    /// Same factor on both axes.
    pub fn uniform(s: f64) -> Self {
        Self { x: s, y: s }
    }

    /// Whether both axes scale by the same magnitude. Mirroring is ignored.
    pub fn is_uniform(self) -> bool {
        self.x.abs() == self.y.abs()
    }

    /// Rendered content size for content of natural size `(w, h)`.
    pub fn applied_to(self, natural_w: f64, natural_h: f64) -> (f64, f64) {
        (natural_w * self.x, natural_h * self.y)
    }
}

/// Resolve the scale that places content of natural size `natural_w x natural_h`
/// into a `target_w x target_h` box under `mode`.
///
/// Ratios are compared by magnitude, so a mirrored (negative) box picks the same
/// magnitude as its unmirrored counterpart. Each axis then keeps the sign of its
/// own ratio, which keeps mirrored content mirrored in every mode, the same way
/// the render-time matrix clip does.
///
/// A zero or non-finite dimension never produces NaN or infinity: the affected
/// ratio is 0, and uniform modes collapse to [`FitScale::ZERO`].
pub fn resolve(
    target_w: f64,
    target_h: f64,
    natural_w: f64,
    natural_h: f64,
    mode: FitMode,
) -> FitScale {
    let rx = ratio(target_w, natural_w);
    let ry = ratio(target_h, natural_h);
    match uniform_magnitude(mode, rx, ry) {
        None => FitScale { x: rx, y: ry },
        Some(_) if is_degenerate(natural_w) || is_degenerate(natural_h) => FitScale::ZERO,
        Some(s) => FitScale {
            x: s.copysign(rx),
            y: s.copysign(ry),
        },
    }
}

/// The single magnitude a uniform mode settles on for the pair `(x, y)`, or `None`
/// for `Stretch`. Shared by the render-time matrix clip.
pub(crate) fn uniform_magnitude(mode: FitMode, x: f64, y: f64) -> Option<f64> {
    let (ax, ay) = (x.abs(), y.abs());
    match mode {
        FitMode::Stretch => None,
        FitMode::Contain => Some(ax.min(ay)),
        FitMode::Fill => Some(ax.max(ay)),
        FitMode::Center => Some(ax.min(ay).min(1.0)),
    }
}

fn ratio(target: f64, natural: f64) -> f64 {
    if is_degenerate(natural) || !target.is_finite() {
        return 0.0;
    }
    let r = target / natural;
    if r.is_finite() { r } else { 0.0 }
}

fn is_degenerate(v: f64) -> bool {
    v == 0.0 || !v.is_finite()
}

#[cfg(test)]
#[path = "../../tests/unit/fit/resolver.rs"]
mod tests;
