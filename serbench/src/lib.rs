//! serbench is a fixed-record binary codec and a harness for comparing struct
//! serialization formats on one data shape, the [`Record`].
//!
//! The reference codec is positional: fields are written in declaration order
//! with no tags, fixed-width integers are little-endian, and the single
//! sequence field (`frames`) carries a LEB128 varint length prefix.
//!
//! # Quickstart
//!
//! ```
//! use serbench::Record;
//!
//! let record = Record {
//!     id: 1,
//!     tag: 2,
//!     timestamp: 3,
//!     frames: vec![10, 20],
//!     group_id: 4,
//!     transaction_id: 5,
//! };
//!
//! // 33 fixed bytes + 1 length byte + 2 frames.
//! assert_eq!(record.size(), 50);
//!
//! let mut buf = record.marshal(Vec::new()).unwrap();
//! let (decoded, consumed) = Record::unmarshal(&buf).unwrap();
//! assert_eq!((decoded, consumed), (record.clone(), 50));
//!
//! // Reuse the same allocation for the next record.
//! buf = record.marshal(buf).unwrap();
//! assert_eq!(buf.len(), 50);
//! ```
//!
//! # Schemas
//!
//! Encoding is driven by [`SchemaWrite`] and [`SchemaRead`] implementations,
//! which describe a wire layout for a Rust type. The length prefix is
//! pluggable via [`SeqLen`](len::SeqLen): [`RecordSchema<VarintLen>`] is the
//! reference codec, and [`RecordSchema<BincodeLen>`] produces the same bytes as
//! `bincode` 1.x:
//!
//! ```
//! use serbench::{len::BincodeLen, Record, RecordSchema, Serialize};
//!
//! let record = Record { frames: vec![1, 2, 3], ..Record::default() };
//! assert_eq!(
//!     RecordSchema::<BincodeLen>::serialize(&record).unwrap(),
//!     bincode::serialize(&record).unwrap(),
//! );
//! ```
//!
//! [`RecordSchema<VarintLen>`]: RecordSchema
//! [`RecordSchema<BincodeLen>`]: RecordSchema
pub mod error;
pub use error::{Error, Result};
pub mod io;
pub mod len;
pub mod varint;
mod schema;
pub use schema::*;
mod codec;
pub use codec::*;
pub mod record;
pub use record::{Record, RecordSchema};
pub mod harness;

#[cfg(test)]
mod proptest_config;
