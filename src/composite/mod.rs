pub(crate) mod pixel;
pub(crate) mod rect;
pub(crate) mod surface;
pub(crate) mod threading;
