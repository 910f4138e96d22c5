pub(crate) mod library;
pub(crate) mod model;
pub(crate) mod primitive;
pub(crate) mod validate;
