//! Types shared by every database backend

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
