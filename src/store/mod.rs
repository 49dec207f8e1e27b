pub(crate) mod canvas;
pub(crate) mod id;
pub(crate) mod stripes;
