//! Records and wire views for the two resource kinds.
//!
//! Each kind keeps its own identifier rule: users carry store-assigned
//! integers (rendered as strings only in the create response), products carry
//! caller-supplied string ids.

pub mod errors;
pub mod product;
pub mod user;
