pub(crate) mod callouts;
pub(crate) mod interpolate;
