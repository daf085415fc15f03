use crate::foundation::core::{PctPoint, Point, Rect, Size};
use crate::foundation::math::{clamp_pct, finite_or_zero};

/// Affine mapping from annotation percentage space to viewport pixels.
///
/// `width`/`height` are the size of the displayed video picture, `offset_x`/`offset_y` the
/// letterbox/pillarbox bars before it, and `scale` the ratio of displayed to natural video size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasDimensions {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl CanvasDimensions {
    /// A viewport exactly covered by the video, without bars.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: finite_or_zero(width).max(0.0),
            height: finite_or_zero(height).max(0.0),
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }

    /// Fit a video of natural size `video` inside `container`, preserving aspect ratio.
    ///
    /// Falls back to filling the container when the video size is unknown (zero or non-finite).
    pub fn fit(container: Size, video: Size) -> Self {
        let cw = finite_or_zero(container.width).max(0.0);
        let ch = finite_or_zero(container.height).max(0.0);
        let vw = finite_or_zero(video.width);
        let vh = finite_or_zero(video.height);
        if vw <= 0.0 || vh <= 0.0 {
            return Self::new(cw, ch);
        }

        let scale = (cw / vw).min(ch / vh);
        let width = vw * scale;
        let height = vh * scale;
        Self {
            width,
            height,
            offset_x: (cw - width) * 0.5,
            offset_y: (ch - height) * 0.5,
            scale,
        }
    }

    /// Pixel rectangle covered by the video picture.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.offset_x + self.width,
            self.offset_y + self.height,
        )
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Percentage point to viewport pixels. Out-of-range or non-finite input is clamped first.
    pub fn to_pixels(&self, pct: PctPoint) -> Point {
        Point::new(
            self.offset_x + clamp_pct(pct[0]) / 100.0 * self.width,
            self.offset_y + clamp_pct(pct[1]) / 100.0 * self.height,
        )
    }

    /// Viewport pixels back to percentage space (not clamped).
    pub fn to_percent(&self, p: Point) -> PctPoint {
        let rel = |v: f64, off: f64, len: f64| {
            if len > 0.0 {
                (v - off) / len * 100.0
            } else {
                0.0
            }
        };
        [
            rel(p.x, self.offset_x, self.width),
            rel(p.y, self.offset_y, self.height),
        ]
    }

    /// A length given in percent of the picture width, in pixels.
    pub fn pct_width_to_px(&self, pct: f64) -> f64 {
        finite_or_zero(pct) / 100.0 * self.width
    }

    /// Scale a length in natural video pixels to viewport pixels.
    pub fn scale_px(&self, natural: f64) -> f64 {
        finite_or_zero(natural) * self.scale
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/mapper.rs"]
mod tests;
