//! `usercards` - a small user-record manager
//!
//! This library keeps a list of user records (name, second name, date of
//! birth, email) keyed by email, mirrors them to persistent storage, and
//! renders each one as a card in an element tree driven by a form.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod logging;
pub mod record;
pub mod state;
pub mod storage;
pub mod store;
pub mod view;

pub use config::Config;
pub use controller::{Outcome, SubmitOutcome};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{Field, Record};
pub use state::AppState;
pub use storage::{Backend, StorageStats};
pub use store::{RecordStore, Records};
