pub(crate) mod model;
pub(crate) mod point;
pub(crate) mod span;
