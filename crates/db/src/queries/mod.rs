//! Session-parameterized query functions.
//!
//! Every function here runs against whatever connection or transaction the
//! caller passes in. Transaction boundaries are owned by the service layer;
//! the queries never open or commit one themselves.

pub mod media;
pub mod tweet;
pub mod user;

pub(crate) fn db_err(e: sea_orm::DbErr) -> chirp_common::AppError {
    chirp_common::AppError::Database(e.to_string())
}
