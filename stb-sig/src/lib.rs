#![no_std]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod chain;
mod envelope;
mod error;
mod hash;

pub use chain::{AnchorValidator, ChainValidator, validate_chain};
pub use envelope::{Envelope, locate, locate_and_decode};
pub use error::Error;
pub use hash::bound_hash;
