pub(crate) mod mapper;
pub(crate) mod placement;
pub(crate) mod text_box;
