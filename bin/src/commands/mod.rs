//! CLI command implementations.

pub(crate) mod compare;
pub(crate) mod draft;
pub(crate) mod estimate;
pub(crate) mod launch;
pub(crate) mod model;
