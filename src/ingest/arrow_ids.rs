use crate::foundation::math::distance;
use crate::model::annotation::{AnnotationFrame, ArrowAnnotation};

/// Assign stable synthetic ids to arrows across consecutive keyframes.
///
/// Each arrow in frame `k` is matched to at most one arrow in frame `k - 1`, greedily by the
/// smallest endpoint displacement (`|from - from'| + |to - to'|`, in percentage units) no larger
/// than `match_radius`. A matched arrow inherits its predecessor's id; an unmatched arrow gets a
/// fresh `arrow-N` id. Frames must already be sorted by timestamp.
pub(crate) fn assign_arrow_ids(frames: &mut [AnnotationFrame], match_radius: f64) {
    let mut next_id = 0u64;
    let mut fresh_id = || {
        let id = format!("arrow-{next_id}");
        next_id += 1;
        id
    };

    let mut prev: Vec<ArrowAnnotation> = Vec::new();
    for frame in frames.iter_mut() {
        let mut candidates = Vec::<(f64, usize, usize)>::new();
        for (pi, p) in prev.iter().enumerate() {
            for (ci, c) in frame.arrows.iter().enumerate() {
                let cost = endpoint_cost(p, c);
                if cost <= match_radius {
                    candidates.push((cost, pi, ci));
                }
            }
        }
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

        let mut prev_taken = vec![false; prev.len()];
        let mut assigned: Vec<Option<String>> = vec![None; frame.arrows.len()];
        for (_, pi, ci) in candidates {
            if prev_taken[pi] || assigned[ci].is_some() {
                continue;
            }
            prev_taken[pi] = true;
            assigned[ci] = Some(prev[pi].id.clone());
        }

        for (arrow, id) in frame.arrows.iter_mut().zip(assigned) {
            arrow.id = id.unwrap_or_else(&mut fresh_id);
        }
        prev = frame.arrows.clone();
    }
}

fn endpoint_cost(a: &ArrowAnnotation, b: &ArrowAnnotation) -> f64 {
    distance(a.from, b.from) + distance(a.to, b.to)
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/arrow_ids.rs"]
mod tests;
