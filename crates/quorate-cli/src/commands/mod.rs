pub(crate) mod endorsers;
pub(crate) mod helpers;
pub(crate) mod quorum;
pub(crate) mod sweep;
