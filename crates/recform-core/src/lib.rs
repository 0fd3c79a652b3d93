//! # recform-core - Core Domain Types
//!
//! Foundation crate for recform. Provides record types, the ordered field
//! map, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! - [`Record`], [`RecordId`], [`OwnerId`] - the entity being edited
//! - [`FieldMap`] - insertion-ordered `name -> value` map
//! - [`Error`], [`Result`], [`ResultExt`] - error enum and helpers
//!
//! ## Prelude
//!
//! ```rust
//! use recform_core::prelude::*;
//! ```

pub mod error;
pub mod field_map;
pub mod logging;
pub mod record;

/// Prelude for common imports used throughout all recform crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt};
pub use field_map::FieldMap;
pub use record::{OwnerId, Record, RecordId};
