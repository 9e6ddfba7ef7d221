//! Fit-mode math shared by the dual-object frame and the single-object boundary.

pub(crate) mod mode;
pub(crate) mod resolver;
