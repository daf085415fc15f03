//! Fixed football vocabularies used to rank labels, terms and callouts.
//!
//! Matching is whole-word and case-insensitive: text is split on anything that is not
//! alphanumeric, so `"Pass-Rush"` mentions `"pass rush"` but `"bypass"` does not mention `"pass"`.

/// Tactical/action vocabulary. Labels mentioning these outrank roster positions.
pub const CONCEPT_TERMS: &[&str] = &[
    "pursuit",
    "pursuit angle",
    "coverage",
    "zone coverage",
    "man coverage",
    "cover 0",
    "cover 1",
    "cover 2",
    "cover 3",
    "cover 4",
    "blocking",
    "block",
    "double team",
    "pull",
    "pulling",
    "seal",
    "pass rush",
    "blitz",
    "stunt",
    "twist",
    "pressure",
    "sack",
    "contain",
    "run fit",
    "gap",
    "leverage",
    "tackle",
    "tackling",
    "missed tackle",
    "play action",
    "screen",
    "read option",
    "route",
    "separation",
    "press",
    "pocket",
    "lane",
    "yards after catch",
    "takeaway",
    "interception",
    "fumble",
];

/// Roster position abbreviations (compared after stripping trailing jersey/depth digits).
pub const POSITION_LABELS: &[&str] = &[
    "qb", "rb", "hb", "fb", "wr", "te", "ol", "lt", "lg", "c", "rg", "rt", "ot", "og", "g", "t",
    "dl", "de", "dt", "nt", "edge", "lb", "mlb", "ilb", "olb", "mike", "will", "sam", "cb", "nb",
    "nickel", "s", "fs", "ss", "db", "k", "p", "ls", "kr", "pr",
];

/// Role descriptions that mark a player as a key actor worth circling.
pub const KEY_ACTOR_TERMS: &[&str] = &[
    "ball carrier",
    "carrier",
    "runner",
    "blocker",
    "lead blocker",
    "receiver",
    "target",
    "quarterback",
    "passer",
    "rusher",
    "pass rusher",
    "tackler",
    "defender",
    "returner",
];

/// Core football terms that get a boost when picking terminology popups.
pub const CORE_TERMS: &[&str] = &[
    "shotgun",
    "pistol",
    "under center",
    "play action",
    "blitz",
    "zone coverage",
    "man coverage",
    "cover 2",
    "cover 3",
    "pass rush",
    "pursuit",
    "run fit",
    "screen",
    "rpo",
    "read option",
    "double team",
    "pocket",
    "line of scrimmage",
    "red zone",
    "first down",
];

/// Action/outcome concepts favored when deciding which editorial callouts survive.
pub const ACTION_CONCEPTS: &[&str] = &[
    "pursuit",
    "pass rush",
    "blocking",
    "block",
    "double team",
    "coverage",
    "tackle",
    "missed tackle",
    "blitz",
    "pressure",
    "sack",
    "contain",
    "seal",
    "run fit",
    "gap",
    "separation",
    "yards after catch",
    "takeaway",
    "interception",
    "fumble",
];

/// Pre-snap setup vocabulary (formations, alignments).
pub const SETUP_TERMS: &[&str] = &[
    "formation",
    "shotgun",
    "pistol",
    "i formation",
    "singleback",
    "under center",
    "trips",
    "bunch",
    "empty",
    "spread",
    "pro set",
    "wildcat",
    "alignment",
    "lined up",
];

/// Phrases that claim a causal link to the play's outcome.
pub const OUTCOME_KEYWORDS: &[&str] = &[
    "because",
    "allowed",
    "allows",
    "prevented",
    "prevents",
    "led to",
    "resulted",
    "forced",
    "created",
    "caused",
    "enabled",
    "opened",
];

/// How a label ranks for broadcast-style display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    /// Tactical concept; always ranks first.
    Concept,
    Other,
    /// Roster position; always ranks last.
    Position,
}

pub fn classify_label(label: &str) -> LabelKind {
    if is_concept(label) {
        LabelKind::Concept
    } else if is_position_label(label) {
        LabelKind::Position
    } else {
        LabelKind::Other
    }
}

pub fn is_concept(text: &str) -> bool {
    mentions_any(text, CONCEPT_TERMS)
}

/// `true` when every word of `label` is a position abbreviation (e.g. `"WR1"`, `"LT / LG"`).
pub fn is_position_label(label: &str) -> bool {
    let words = words(label);
    !words.is_empty()
        && words.iter().all(|w| {
            let base = w.trim_end_matches(|c: char| c.is_ascii_digit());
            !base.is_empty() && POSITION_LABELS.contains(&base)
        })
}

pub fn is_key_actor(label: &str) -> bool {
    mentions_any(label, KEY_ACTOR_TERMS)
}

pub fn is_core_term(term: &str) -> bool {
    let w = words(term);
    CORE_TERMS.iter().any(|c| words(c) == w)
}

pub fn mentions_action_concept(text: &str) -> bool {
    mentions_any(text, ACTION_CONCEPTS)
}

pub fn mentions_setup_term(text: &str) -> bool {
    mentions_any(text, SETUP_TERMS)
}

pub fn claims_causality(text: &str) -> bool {
    mentions_any(text, OUTCOME_KEYWORDS)
}

/// Whole-word, case-insensitive phrase search against a vocabulary.
pub fn mentions_any(text: &str, vocab: &[&str]) -> bool {
    let hay = words(text);
    vocab.iter().any(|phrase| {
        let needle = words(phrase);
        !needle.is_empty() && hay.windows(needle.len()).any(|w| w == needle.as_slice())
    })
}

fn words(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/model/vocab.rs"]
mod tests;
