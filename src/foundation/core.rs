pub use kurbo::{Affine, Point, Rect, Vec2};

/// Anchor that `left`/`top` refer to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// `left`/`top` is the unrotated top-left corner; rotation pivots around it.
    #[default]
    TopLeft,
    /// `left`/`top` is the box center.
    Center,
}

/// Placement of a scene object: position, box size, scale, rotation and stroke.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    /// Horizontal position of the origin anchor.
    #[serde(default)]
    pub left: f64,
    /// Vertical position of the origin anchor.
    #[serde(default)]
    pub top: f64,
    /// Unscaled box width (>= 0).
    #[serde(default, deserialize_with = "non_negative")]
    pub width: f64,
    /// Unscaled box height (>= 0).
    #[serde(default, deserialize_with = "non_negative")]
    pub height: f64,
    /// Horizontal scale factor (negative mirrors).
    #[serde(default = "one")]
    pub scale_x: f64,
    /// Vertical scale factor (negative mirrors).
    #[serde(default = "one")]
    pub scale_y: f64,
    /// Rotation in degrees, clockwise in y-down space.
    #[serde(default)]
    pub angle: f64,
    /// Stroke width; visual only.
    #[serde(default = "one")]
    pub stroke_width: f64,
    /// Which point `left`/`top` anchors.
    #[serde(default)]
    pub origin: Origin,
}

fn one() -> f64 {
    1.0
}

// Persisted sizes go through the same clamp as `Geometry::new`.
fn non_negative<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = <f64 as serde::Deserialize>::deserialize(deserializer)?;
    Ok(if v.is_nan() { 0.0 } else { v.max(0.0) })
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            stroke_width: 1.0,
            origin: Origin::TopLeft,
        }
    }
}

impl Geometry {
    /// Top-left anchored box at `(left, top)` with unit scale.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
            ..Self::default()
        }
    }

    /// Set the unscaled box size, clamping negatives to 0.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Box size after scale: `(width * scale_x, height * scale_y)`.
    pub fn scaled_size(&self) -> (f64, f64) {
        (self.width * self.scale_x, self.height * self.scale_y)
    }

    /// Box center in scene space, honoring rotation around a top-left origin.
    pub fn center(&self) -> Point {
        match self.origin {
            Origin::Center => Point::new(self.left, self.top),
            Origin::TopLeft => {
                let (w, h) = self.scaled_size();
                let half = Affine::rotate(self.angle.to_radians()) * Point::new(w * 0.5, h * 0.5);
                Point::new(self.left + half.x, self.top + half.y)
            }
        }
    }

    /// Move the object so that its center lands on `center`.
    pub fn set_center(&mut self, center: Point) {
        match self.origin {
            Origin::Center => {
                self.left = center.x;
                self.top = center.y;
            }
            Origin::TopLeft => {
                let delta = center - self.center();
                self.left += delta.x;
                self.top += delta.y;
            }
        }
    }

    /// Center-based object matrix: `T(center) * R(angle) * S(scale_x, scale_y)`.
    pub fn matrix(&self) -> Affine {
        Affine::translate(self.center().to_vec2())
            * Affine::rotate(self.angle.to_radians())
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }

    /// Content rect in local (pre-matrix) space, centered on the origin.
    pub fn local_rect(&self) -> Rect {
        Rect::new(
            -self.width * 0.5,
            -self.height * 0.5,
            self.width * 0.5,
            self.height * 0.5,
        )
    }

    /// Whether `p` (scene space) lies inside the rotated, scaled box.
    pub fn contains_point(&self, p: Point) -> bool {
        let m = self.matrix();
        if m.determinant() == 0.0 {
            return false;
        }
        let local = m.inverse() * p;
        let r = self.local_rect();
        local.x >= r.x0 && local.x <= r.x1 && local.y >= r.y0 && local.y <= r.y1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
