//! Core domain logic for the sleep tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Entries: the immutable record of one sleep session
//! - Duration: deriving whole-hour sleep durations from a date and two times of day
//! - Retention: keeping only the trailing two weeks of entries
//! - Storage: the entry store over a string-keyed persistence backend
//! - Form: the in-progress state of a new sleep entry

pub mod duration;
pub mod entry;
pub mod form;
pub mod identity;
pub mod notice;
pub mod retention;
pub mod route;
pub mod store;
pub mod types;

pub use duration::{DurationError, Rollover, compute_duration, duration_between};
pub use entry::{DATE_FORMAT, SleepEntry, StoredEntry, TIME_FORMAT, parse_date, parse_time};
pub use form::{EntryForm, FormError};
pub use identity::{IdToken, IdentityError, IdentityProvider, SignInOutcome, complete_sign_in};
pub use notice::Notice;
pub use retention::{RETENTION_DAYS, RetentionWindow, retain_recent};
pub use route::{Route, UnknownRoute};
pub use store::{EntryStore, KeyValueStore, LastSubmission, MemoryStore, StoreError};
pub use types::{SleepDuration, ValidationError};
