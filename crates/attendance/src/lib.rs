//! `attendance` - employee attendance recording against a hosted document store
//!
//! This library collects attendance submissions (name, attendance type, an
//! optional device position, a server timestamp) into a hosted record
//! collection, and offers an admin browser over the fetched records with
//! client-side filtering and CSV export. Identity, storage, and geolocation
//! are external collaborators reached through trait seams.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod location;
pub mod logging;
pub mod record;
pub mod store;

pub use app::{App, MarkInput, Screen};
pub use config::Config;
pub use error::{Error, Result};
pub use filter::{RecordFilter, Summary};
pub use logging::init_logging;
pub use record::{AttendanceRecord, WorkOption};
