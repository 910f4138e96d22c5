pub(crate) mod infer;
pub(crate) mod pattern;
