//! recform-store - Record store and session collaborators
//!
//! Defines the two external collaborators of the edit/create dialog:
//! - [`RecordStore`]: fetch, create and update records
//! - [`SessionProvider`]: the principal that owns newly created records
//!
//! Also ships [`InMemoryRecordStore`] for the headless driver, and (behind the
//! `test-helpers` feature) a scripted store for tests.

pub mod memory;
pub mod session;
pub mod store;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use memory::InMemoryRecordStore;
pub use session::{SessionProvider, StaticSession};
pub use store::{LocalRecordStore, RecordStore};
