//! Core types and traits
//!
//! This module contains the building blocks shared by the registry and the
//! schema walker:
//!
//! - **Traits**: [`Rule`], with its per-call [`RuleOptions`]
//! - **Errors**: [`ConfigError`] for broken schemas and rule definitions
//! - **Output**: [`ErrorTree`] and [`Outcome`], the per-field verdicts
//!
//! # Two kinds of failure
//!
//! Data that fails a rule is an expected outcome. It is written into the
//! error tree and validation carries on with the next field:
//!
//! ```rust,ignore
//! errors.get("email") == Some(&ErrorTree::failure("email is invalid"))
//! ```
//!
//! A schema that names an unknown rule, or input that lacks a key the schema
//! declares, is a [`ConfigError`]. It stops validation and is returned to the
//! caller, who should fix the schema rather than show the message to users.

pub mod error;
pub mod outcome;
pub mod traits;

pub use error::ConfigError;
pub use outcome::{ErrorTree, Outcome, SUCCESS};
pub use traits::{Rule, RuleOptions};

pub(crate) use error::json_kind;
pub(crate) use outcome::join_key;

/// Result alias for operations that can hit a configuration error.
pub type ConfigResult<T> = Result<T, ConfigError>;
