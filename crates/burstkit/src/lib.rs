//! Client library for the Burst node HTTP API.
//!
//! [`HttpNodeService`] implements [`BurstNodeService`], one method per node
//! operation; [`poll::subscribe`] turns `getMiningInfo` into a
//! change-detecting stream.

pub mod api;
pub mod entity;
pub mod error;
pub mod poll;
pub mod value;

pub use api::{BurstNodeService, CreateAtRequest, HttpNodeService};
pub use error::{ClientError, DecodeError};
