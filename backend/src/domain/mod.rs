//! Domain primitives, services and ports.
//!
//! Public surface:
//! - [`User`] with its sanitising, defaulting and validation rules.
//! - [`Error`] / [`ErrorCode`], the transport-agnostic failure payload.
//! - [`UserService`], the implementation of the
//!   [`ports::UserAccounts`] driving port.
//! - [`TraceId`], the request correlation identifier.

mod best_effort;
pub mod error;
pub mod ports;
mod trace_id;
pub mod user;
mod user_service;

pub use self::best_effort::BestEffort;
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserValidationError, validate_email};
pub use self::user_service::UserService;
