pub(crate) mod compile;
pub(crate) mod ease;
pub(crate) mod observable;
pub(crate) mod path_anim;
