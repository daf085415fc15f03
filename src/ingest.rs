pub(crate) mod arrow_ids;
pub(crate) mod callouts;
pub(crate) mod parse;
pub(crate) mod pipeline;

pub use callouts::{CalloutRules, schedule_callouts, score_callout};
pub use parse::Rejection;
pub use pipeline::{IngestOpts, IngestReport, load_play};
