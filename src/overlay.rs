pub(crate) mod broadcast;
pub(crate) mod terminology;
