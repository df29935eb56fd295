//! Brand-specific supplier reconciliation: a declarative profile per brand
//! plus one generic reconciliation routine driven by those profiles.

pub mod profile;
pub mod reconcile;
