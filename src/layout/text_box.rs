use crate::foundation::core::Size;
use crate::foundation::error::{GridmarkError, GridmarkResult};

/// Fixed-metric text measurement used to size overlay boxes before placement.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextBoxOpts {
    pub char_width_px: f64,
    pub line_height_px: f64,
    pub padding_px: f64,
    pub max_box_width_px: f64,
}

impl Default for TextBoxOpts {
    fn default() -> Self {
        Self {
            char_width_px: 7.5,
            line_height_px: 18.0,
            padding_px: 8.0,
            max_box_width_px: 260.0,
        }
    }
}

impl TextBoxOpts {
    pub fn validate(&self) -> GridmarkResult<()> {
        for (name, v) in [
            ("char_width_px", self.char_width_px),
            ("line_height_px", self.line_height_px),
            ("padding_px", self.padding_px),
            ("max_box_width_px", self.max_box_width_px),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(GridmarkError::validation(format!(
                    "text_box.{name} must be finite and >= 0"
                )));
            }
        }
        if self.char_width_px <= 0.0 {
            return Err(GridmarkError::validation(
                "text_box.char_width_px must be > 0",
            ));
        }
        if self.max_box_width_px < self.char_width_px + 2.0 * self.padding_px {
            return Err(GridmarkError::validation(
                "text_box.max_box_width_px must fit at least one character plus padding",
            ));
        }
        Ok(())
    }
}

/// Estimate the box for `text`: greedy word wrap at `max_box_width_px`, one line per paragraph
/// minimum. Words longer than a line are broken by character.
pub fn estimate_box_size(text: &str, opts: &TextBoxOpts) -> Size {
    let cw = opts.char_width_px.max(f64::EPSILON);
    let inner = (opts.max_box_width_px - 2.0 * opts.padding_px).max(cw);
    let max_cols = ((inner / cw).floor() as usize).max(1);

    let mut lines = 0usize;
    let mut widest = 0usize;
    for paragraph in text.lines() {
        let mut col = 0usize;
        let mut para_lines = 1usize;
        for word in paragraph.split_whitespace() {
            let mut len = word.chars().count();
            let needed = if col == 0 { len } else { col + 1 + len };
            if needed <= max_cols {
                col = needed;
                continue;
            }
            if col > 0 {
                widest = widest.max(col);
                para_lines += 1;
            }
            while len > max_cols {
                widest = max_cols;
                para_lines += 1;
                len -= max_cols;
            }
            col = len;
        }
        widest = widest.max(col);
        lines += para_lines;
    }
    let lines = lines.max(1);

    Size::new(
        widest as f64 * cw + 2.0 * opts.padding_px,
        lines as f64 * opts.line_height_px + 2.0 * opts.padding_px,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text_box.rs"]
mod tests;
