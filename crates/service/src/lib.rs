//! Resource stores and the validation engine.
//! - `users`: sequential integer ids, create/read/replace.
//! - `products`: caller-keyed records, read/replace/delete behind the product predicate.
//! - `validation`: pluggable payload checks that report every violation.

pub mod errors;
pub mod products;
pub mod repository;
pub mod storage;
pub mod users;
pub mod validation;
