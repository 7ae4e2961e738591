//! Records of values describing a step of processing.
//!
//! A [`Record`] is a set of key-value pairs. Bodies return one at each step
//! with the phase of the episode, the clipped reward and so on, which callers
//! can log or aggregate.
//!
//! ```rust
//! use border_state::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("reward", RecordValue::Scalar(-1.0));
//! record.insert("phase", RecordValue::String("noop".to_string()));
//! assert_eq!(record.get_scalar("reward").unwrap(), -1.0);
//! ```
mod base;
pub use base::{Record, RecordValue};
