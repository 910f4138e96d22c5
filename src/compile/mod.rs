pub(crate) mod fingerprint;
pub(crate) mod parser;
pub(crate) mod program;
