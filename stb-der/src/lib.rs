#![no_std]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

extern crate alloc;

mod oid;

pub use oid::*;

pub use der;
pub use der::{Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Tag, Writer};
pub use der::asn1::{AnyRef, ContextSpecific, ObjectIdentifier, OctetString, OctetStringRef, Uint, UintRef};
pub use der::TagMode;
pub use der::TagNumber;
