pub(crate) mod annotation;
pub(crate) mod callout;
pub(crate) mod play;
pub mod vocab;
