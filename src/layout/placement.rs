use crate::foundation::core::{Point, Rect, Size};
use crate::foundation::error::{GridmarkError, GridmarkResult};
use crate::foundation::math::finite_or_zero;
use crate::layout::mapper::CanvasDimensions;

/// Bonus granted to candidates that fit entirely inside the safe rect, large enough that any
/// in-bounds placement beats any overflowing one.
const IN_BOUNDS_BONUS: f64 = 1000.0;

/// Side of the anchor a box is drawn on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl Placement {
    pub const ALL: [Placement; 4] = [
        Placement::Top,
        Placement::Bottom,
        Placement::Left,
        Placement::Right,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlacementOpts {
    /// Gap between the anchor and the near edge of the box.
    pub anchor_offset_px: f64,
    /// Inset from the video frame that boxes should stay inside.
    pub safe_margin_px: f64,
}

impl Default for PlacementOpts {
    fn default() -> Self {
        Self {
            anchor_offset_px: 8.0,
            safe_margin_px: 8.0,
        }
    }
}

impl PlacementOpts {
    pub fn validate(&self) -> GridmarkResult<()> {
        for (name, v) in [
            ("anchor_offset_px", self.anchor_offset_px),
            ("safe_margin_px", self.safe_margin_px),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(GridmarkError::validation(format!(
                    "placement.{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlacedBox {
    pub origin: Point,
    pub size: Size,
    pub placement: Placement,
}

impl PlacedBox {
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

/// Pick a side for a box of `size` next to `anchor` and clamp it inside the video frame.
///
/// Candidates are scored by overflow past the safe-margin rect; `preferred` wins ties, then the
/// fixed order top, bottom, left, right. The result always lies inside the frame rect when the
/// box fits in it.
pub fn place_box(
    anchor: Point,
    size: Size,
    dims: &CanvasDimensions,
    preferred: Placement,
    opts: &PlacementOpts,
) -> PlacedBox {
    let anchor = Point::new(finite_or_zero(anchor.x), finite_or_zero(anchor.y));
    let size = Size::new(
        finite_or_zero(size.width).max(0.0),
        finite_or_zero(size.height).max(0.0),
    );
    let frame = dims.rect();
    let margin = finite_or_zero(opts.safe_margin_px).max(0.0);
    let safe = frame.inset(-margin);

    let order = std::iter::once(preferred).chain(Placement::ALL);
    let mut best: Option<(Placement, Point, f64)> = None;
    for placement in order {
        let origin = candidate_origin(anchor, size, placement, opts.anchor_offset_px);
        let over = overflow(Rect::from_origin_size(origin, size), safe);
        let score = if over == 0.0 {
            IN_BOUNDS_BONUS
        } else {
            -over
        };
        if best.is_none_or(|(_, _, s)| score > s) {
            best = Some((placement, origin, score));
        }
    }

    let (placement, origin, _) = best.unwrap_or((preferred, anchor, 0.0));
    let origin = Point::new(
        clamp_axis(origin.x, size.width, frame.x0, frame.x1, margin),
        clamp_axis(origin.y, size.height, frame.y0, frame.y1, margin),
    );
    tracing::trace!(?placement, x = origin.x, y = origin.y, "placed box");

    PlacedBox {
        origin,
        size,
        placement,
    }
}

/// Quadrant heuristic: on the axis where the anchor sits farther from the frame center, point the
/// box back toward the center. Horizontal wins ties.
pub fn preferred_placement(anchor: Point, dims: &CanvasDimensions) -> Placement {
    let center = dims.center();
    let dx = finite_or_zero(anchor.x - center.x);
    let dy = finite_or_zero(anchor.y - center.y);
    if dx.abs() >= dy.abs() {
        if dx > 0.0 {
            Placement::Left
        } else {
            Placement::Right
        }
    } else if dy > 0.0 {
        Placement::Top
    } else {
        Placement::Bottom
    }
}

fn candidate_origin(anchor: Point, size: Size, placement: Placement, offset: f64) -> Point {
    let offset = finite_or_zero(offset);
    match placement {
        Placement::Top => Point::new(
            anchor.x - size.width * 0.5,
            anchor.y - size.height - offset,
        ),
        Placement::Bottom => Point::new(anchor.x - size.width * 0.5, anchor.y + offset),
        Placement::Left => Point::new(
            anchor.x - size.width - offset,
            anchor.y - size.height * 0.5,
        ),
        Placement::Right => Point::new(anchor.x + offset, anchor.y - size.height * 0.5),
    }
}

/// Total distance the box pokes out of `bounds`, summed over the four sides.
fn overflow(r: Rect, bounds: Rect) -> f64 {
    (bounds.x0 - r.x0).max(0.0)
        + (r.x1 - bounds.x1).max(0.0)
        + (bounds.y0 - r.y0).max(0.0)
        + (r.y1 - bounds.y1).max(0.0)
}

/// Clamp a box start on one axis. The margin collapses when the box does not fit inside it, and
/// a box larger than the frame is pinned to the frame start.
fn clamp_axis(start: f64, len: f64, lo: f64, hi: f64, margin: f64) -> f64 {
    let (lo_m, hi_m) = (lo + margin, hi - margin);
    if len <= hi_m - lo_m {
        start.clamp(lo_m, hi_m - len)
    } else if len <= hi - lo {
        start.clamp(lo, hi - len)
    } else {
        lo
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
