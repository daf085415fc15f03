use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::foundation::core::{PctPoint, Rgb8};
use crate::foundation::math::clamp_pct;
use crate::model::annotation::{
    AnnotationFrame, ArrowAnnotation, PlayerAnnotation, TerminologyAnnotation,
};
use crate::model::callout::{CalloutAnchor, CalloutDecoration, EditorialCallout};

/// Why an item of the raw analysis document was dropped during ingestion.
///
/// `at` is a JSON path such as `$.frames[2].players[0]`.
#[derive(thiserror::Error, Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    #[error("{at}: expected an object")]
    NotAnObject { at: String },

    #[error("{at}: missing required field '{field}'")]
    MissingField { at: String, field: &'static str },

    #[error("{at}: duplicate id '{id}'")]
    DuplicateId { at: String, id: String },

    #[error("callout '{id}': lasts {duration:.2}s after clamping, below the {min:.1}s minimum")]
    TooShort { id: String, duration: f64, min: f64 },

    #[error("callout '{id}': dropped by the per-play cap of {cap}")]
    OverCap { id: String, cap: usize },

    #[error("callout '{id}': no longer fits before the end of the video after staggering")]
    NoRoomAfterStagger { id: String },
}

/// Parse one raw keyframe.
///
/// Individual players and terms that fail validation are pushed to `rejections` and skipped; the
/// frame itself is only rejected when it is not an object.
pub(crate) fn parse_frame(
    value: &Value,
    at: &str,
    default_term_duration_s: f64,
    rejections: &mut Vec<Rejection>,
) -> Result<AnnotationFrame, Rejection> {
    let obj = as_object(value, at)?;
    let timestamp = number(obj, "timestamp").map_or(0.0, |t| t.max(0.0));

    let mut players = Vec::new();
    let mut seen_ids = HashSet::new();
    for (i, v) in array(obj, "players").iter().enumerate() {
        let at = format!("{at}.players[{i}]");
        match parse_player(v, &at) {
            Ok(p) if !seen_ids.insert(p.id.clone()) => {
                rejections.push(Rejection::DuplicateId { at, id: p.id });
            }
            Ok(p) => players.push(p),
            Err(r) => rejections.push(r),
        }
    }

    let mut arrows = Vec::new();
    for (i, v) in array(obj, "arrows").iter().enumerate() {
        match parse_arrow(v, &format!("{at}.arrows[{i}]")) {
            Ok(a) => arrows.push(a),
            Err(r) => rejections.push(r),
        }
    }

    let mut terminology = Vec::new();
    for (i, v) in array(obj, "terminology").iter().enumerate() {
        match parse_term(v, &format!("{at}.terminology[{i}]"), default_term_duration_s) {
            Ok(t) => terminology.push(t),
            Err(r) => rejections.push(r),
        }
    }

    Ok(AnnotationFrame {
        timestamp,
        players,
        arrows,
        terminology,
    })
}

fn parse_player(value: &Value, at: &str) -> Result<PlayerAnnotation, Rejection> {
    let obj = as_object(value, at)?;
    let id = identifier(obj, "id").ok_or_else(|| missing(at, "id"))?;
    Ok(PlayerAnnotation {
        id,
        x: clamp_pct(number(obj, "x").unwrap_or(0.0)),
        y: clamp_pct(number(obj, "y").unwrap_or(0.0)),
        label: text(obj, "label").unwrap_or_default(),
        highlight: obj
            .get("highlight")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        color: color(obj),
    })
}

fn parse_arrow(value: &Value, at: &str) -> Result<ArrowAnnotation, Rejection> {
    let obj = as_object(value, at)?;
    Ok(ArrowAnnotation {
        id: String::new(),
        from: point(obj.get("from")),
        to: point(obj.get("to")),
        color: color(obj),
        label: text(obj, "label").filter(|l| !l.trim().is_empty()),
        dashed: obj.get("dashed").and_then(Value::as_bool).unwrap_or(false),
    })
}

fn parse_term(
    value: &Value,
    at: &str,
    default_duration_s: f64,
) -> Result<TerminologyAnnotation, Rejection> {
    let obj = as_object(value, at)?;
    let term = text(obj, "term")
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| missing(at, "term"))?;
    Ok(TerminologyAnnotation {
        x: clamp_pct(number(obj, "x").unwrap_or(0.0)),
        y: clamp_pct(number(obj, "y").unwrap_or(0.0)),
        term: term.trim().to_string(),
        definition: text(obj, "definition").unwrap_or_default(),
        duration: number(obj, "duration")
            .filter(|d| *d > 0.0)
            .unwrap_or(default_duration_s),
    })
}

/// Parse one raw editorial callout. Times are taken as-is; clamping, truncation and scheduling
/// happen in [`crate::ingest::callouts::schedule_callouts`].
pub(crate) fn parse_callout(value: &Value, at: &str) -> Result<EditorialCallout, Rejection> {
    let obj = as_object(value, at)?;
    let id = identifier(obj, "id").ok_or_else(|| missing(at, "id"))?;
    let start_time = number(obj, "start_time").ok_or_else(|| missing(at, "start_time"))?;
    let end_time = number(obj, "end_time").ok_or_else(|| missing(at, "end_time"))?;
    let text_value = text(obj, "text")
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| missing(at, "text"))?;

    let anchor_at = format!("{at}.anchor");
    let anchor_obj = obj
        .get("anchor")
        .ok_or_else(|| missing(at, "anchor"))
        .and_then(|v| as_object(v, &anchor_at))?;
    let anchor = CalloutAnchor {
        x: clamp_pct(number(anchor_obj, "x").ok_or_else(|| missing(&anchor_at, "x"))?),
        y: clamp_pct(number(anchor_obj, "y").ok_or_else(|| missing(&anchor_at, "y"))?),
        player_id: identifier(anchor_obj, "player_id"),
    };

    Ok(EditorialCallout {
        id,
        start_time,
        end_time,
        text: text_value.trim().to_string(),
        detail: text(obj, "detail").unwrap_or_default().trim().to_string(),
        anchor,
        decoration: decoration(obj, at),
    })
}

fn decoration(obj: &Map<String, Value>, at: &str) -> Option<CalloutDecoration> {
    if let Some(v) = obj.get("decoration") {
        match serde_json::from_value(v.clone()) {
            Ok(d) => return Some(d),
            Err(err) => {
                tracing::warn!(at, %err, "malformed callout decoration; trying circle/arrow keys");
            }
        }
    }
    let circle = obj.get("circle").and_then(Value::as_object).map(|c| {
        CalloutDecoration::Circle {
            x: clamp_pct(number(c, "x").unwrap_or(0.0)),
            y: clamp_pct(number(c, "y").unwrap_or(0.0)),
            radius: number(c, "radius").map_or(0.0, |r| r.max(0.0)),
        }
    });
    let arrow = obj.get("arrow").and_then(Value::as_object).map(|a| {
        CalloutDecoration::Arrow {
            from: point(a.get("from")),
            to: point(a.get("to")),
        }
    });
    if circle.is_some() && arrow.is_some() {
        tracing::debug!(at, "callout has both circle and arrow; keeping circle");
    }
    circle.or(arrow)
}

fn as_object<'a>(value: &'a Value, at: &str) -> Result<&'a Map<String, Value>, Rejection> {
    value.as_object().ok_or_else(|| Rejection::NotAnObject {
        at: at.to_string(),
    })
}

fn missing(at: &str, field: &'static str) -> Rejection {
    Rejection::MissingField {
        at: at.to_string(),
        field,
    }
}

fn array<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Finite number, also accepting numeric strings.
pub(crate) fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let v = match obj.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Non-empty string id; numeric ids are accepted and stringified.
fn identifier(obj: &Map<String, Value>, key: &str) -> Option<String> {
    let id = match obj.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

fn color(obj: &Map<String, Value>) -> Rgb8 {
    obj.get("color")
        .and_then(Value::as_str)
        .and_then(|s| Rgb8::parse_hex(s).ok())
        .unwrap_or_default()
}

/// `[x, y]` or `{ "x": .., "y": .. }`; anything else maps to the origin.
fn point(value: Option<&Value>) -> PctPoint {
    let coord = |v: Option<&Value>| clamp_pct(v.and_then(Value::as_f64).unwrap_or(0.0));
    match value {
        Some(Value::Array(a)) => [coord(a.first()), coord(a.get(1))],
        Some(Value::Object(o)) => [coord(o.get("x")), coord(o.get("y"))],
        _ => [0.0, 0.0],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/parse.rs"]
mod tests;
