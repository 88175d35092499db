//! HR service layer.
//!
//! Every function here is a thin, validated wrapper over sea-orm queries.
//! Read helpers are generic over [`sea_orm::ConnectionTrait`] so they run on
//! a pool or inside a transaction; operations touching several rows also need
//! [`sea_orm::TransactionTrait`] and open their own transaction, which nests
//! as a savepoint when the caller is already inside one.

pub mod catalog;
pub mod drafts;
pub mod employees;
mod error;
pub mod news;
pub mod seed;
pub mod users;

pub use error::{HrError, HrResult};
