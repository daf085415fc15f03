/// Easing curve applied to opacity ramps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    OutCubic,
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    /// Opacity of a window `[start, end]` sampled at `t`, ramping up over `fade` seconds after
    /// `start` and down over `fade` seconds before `end`. Outside the window the result is `0`.
    pub fn window_opacity(self, t: f64, start: f64, end: f64, fade: f64) -> f64 {
        if !(t >= start && t <= end) {
            return 0.0;
        }
        if fade <= 0.0 || !fade.is_finite() {
            return 1.0;
        }
        let rise = (t - start) / fade;
        let fall = (end - t) / fade;
        self.apply(rise.min(fall))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
