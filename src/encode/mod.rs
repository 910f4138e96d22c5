pub(crate) mod clock;
pub(crate) mod encoder;
pub(crate) mod layout;
