//! Request broker for the NTR analyzer
//!
//! The analysis pipeline runs in a different execution context than the
//! gene lookup adapters, so it cannot call them directly. This crate models
//! that isolation boundary as a message-passing interface: a closed set of
//! tagged request variants ([`LookupRequest`]) and a tagged result
//! ([`LookupResponse`]), carried over a channel to a broker task that owns
//! the adapters.
//!
//! The broker services requests sequentially in arrival order and answers
//! each on its own reply channel, so responses correspond 1:1 to requests
//! with no reordering.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod broker;
pub mod error;
pub mod message;

pub use broker::{BrokerHandle, LookupBroker};
pub use error::BrokerError;
pub use message::{LookupRequest, LookupResponse};
