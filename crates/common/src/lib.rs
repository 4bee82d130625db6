//! Pieces shared by every crate in the workspace: logging setup and the
//! small response bodies that do not belong to any resource.

pub mod types;
pub mod utils;
