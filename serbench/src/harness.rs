//! Uniform interface for comparing serialization formats on [`Record`].
//!
//! Every format under comparison is driven through [`Serializer`], which owns
//! whatever scratch state the format wants to reuse between iterations.
//! [`validate`] checks a serializer for round-trip fidelity before it is timed.
//!
//! ```
//! use serbench::{harness::{validate, SchemaSerializer, Serializer}, Record};
//!
//! let records = vec![
//!     Record { id: 1, frames: vec![1, 2, 3], ..Record::default() },
//!     Record { id: 2, tag: 9, ..Record::default() },
//! ];
//! let mut serializer = SchemaSerializer::varint();
//! validate(&mut serializer, &records).unwrap();
//!
//! let bytes = serializer.marshal(&records[0]).unwrap().to_vec();
//! assert_eq!(serializer.unmarshal(&bytes).unwrap(), &records[0]);
//! ```
use {
    crate::{
        codec::{Deserialize, Serialize},
        error::{external, Error},
        len::{BincodeLen, SeqLen, VarintLen},
        record::{Record, RecordSchema},
    },
    core::{fmt, marker::PhantomData},
    thiserror::Error,
};

/// A format that can encode and decode [`Record`]s.
pub trait Serializer {
    /// Name used in benchmark ids and validation errors.
    fn name(&self) -> &str;

    /// Encode `record`, returning a view of the encoded bytes.
    ///
    /// The bytes are only valid until the next call on this serializer.
    fn marshal(&mut self, record: &Record) -> Result<&[u8], Error>;

    /// Decode the record at the front of `bytes`.
    ///
    /// The record is only valid until the next call on this serializer.
    fn unmarshal(&mut self, bytes: &[u8]) -> Result<&Record, Error>;
}

impl<S: Serializer + ?Sized> Serializer for &mut S {
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn marshal(&mut self, record: &Record) -> Result<&[u8], Error> {
        (**self).marshal(record)
    }

    #[inline(always)]
    fn unmarshal(&mut self, bytes: &[u8]) -> Result<&Record, Error> {
        (**self).unmarshal(bytes)
    }
}

/// [`Serializer`] for [`RecordSchema`], reusing one output buffer and one
/// destination record across calls.
pub struct SchemaSerializer<Len = VarintLen> {
    name: &'static str,
    buf: Vec<u8>,
    dst: Record,
    _len: PhantomData<Len>,
}

impl<Len> SchemaSerializer<Len> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            buf: Vec::new(),
            dst: Record::default(),
            _len: PhantomData,
        }
    }
}

impl SchemaSerializer<VarintLen> {
    /// The reference codec: varint frames length.
    pub fn varint() -> Self {
        Self::new("serbench/varint")
    }
}

impl SchemaSerializer<BincodeLen> {
    /// Fixed `u64` frames length; byte compatible with `bincode` 1.x.
    pub fn fixint() -> Self {
        Self::new("serbench/fixint")
    }
}

impl<Len> fmt::Debug for SchemaSerializer<Len> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaSerializer")
            .field("name", &self.name)
            .field("buf_capacity", &self.buf.capacity())
            .finish_non_exhaustive()
    }
}

impl<Len: SeqLen> Serializer for SchemaSerializer<Len> {
    fn name(&self) -> &str {
        self.name
    }

    #[inline]
    fn marshal(&mut self, record: &Record) -> Result<&[u8], Error> {
        let buf = core::mem::take(&mut self.buf);
        self.buf = RecordSchema::<Len>::serialize_reusing(record, buf)?;
        Ok(&self.buf)
    }

    #[inline]
    fn unmarshal(&mut self, bytes: &[u8]) -> Result<&Record, Error> {
        RecordSchema::<Len>::deserialize_in_place(bytes, &mut self.dst)?;
        Ok(&self.dst)
    }
}

/// [`Serializer`] delegating to `bincode` 1.x through serde.
///
/// Produces the same bytes as [`SchemaSerializer::fixint`].
#[derive(Debug, Default)]
pub struct BincodeSerializer {
    buf: Vec<u8>,
    dst: Record,
}

impl BincodeSerializer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Serializer for BincodeSerializer {
    fn name(&self) -> &str {
        "bincode"
    }

    #[inline]
    fn marshal(&mut self, record: &Record) -> Result<&[u8], Error> {
        self.buf.clear();
        bincode::serialize_into(&mut self.buf, record).map_err(external)?;
        Ok(&self.buf)
    }

    #[inline]
    fn unmarshal(&mut self, bytes: &[u8]) -> Result<&Record, Error> {
        self.dst = bincode::deserialize(bytes).map_err(external)?;
        Ok(&self.dst)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{serializer}: record {index}: {source}")]
    Codec {
        serializer: String,
        index: usize,
        #[source]
        source: Error,
    },
    #[error("{serializer}: record {index}: field `{field}` did not survive a round trip")]
    Mismatch {
        serializer: String,
        index: usize,
        field: &'static str,
    },
}

/// Round-trip every record through `serializer`, comparing field by field.
///
/// Stops at the first failure, naming the record index and, for a mismatch,
/// the first differing field in layout order.
pub fn validate<S: Serializer>(
    mut serializer: S,
    records: &[Record],
) -> Result<(), ValidationError> {
    let codec_error = |serializer: &S, index, source| ValidationError::Codec {
        serializer: serializer.name().to_owned(),
        index,
        source,
    };

    for (index, record) in records.iter().enumerate() {
        let bytes = match serializer.marshal(record).map(<[u8]>::to_vec) {
            Ok(bytes) => bytes,
            Err(e) => return Err(codec_error(&serializer, index, e)),
        };
        let field = match serializer
            .unmarshal(&bytes)
            .map(|decoded| decoded.first_mismatch(record))
        {
            Ok(field) => field,
            Err(e) => return Err(codec_error(&serializer, index, e)),
        };
        if let Some(field) = field {
            tracing::warn!(serializer = serializer.name(), index, field, "round trip mismatch");
            return Err(ValidationError::Mismatch {
                serializer: serializer.name().to_owned(),
                index,
                field,
            });
        }
    }

    tracing::debug!(
        serializer = serializer.name(),
        records = records.len(),
        "validated"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{error::Error, proptest_config::proptest_cfg},
        proptest::prelude::*,
    };

    /// Drops the last frame on decode.
    struct Lossy(SchemaSerializer);

    impl Serializer for Lossy {
        fn name(&self) -> &str {
            "lossy"
        }

        fn marshal(&mut self, record: &Record) -> Result<&[u8], Error> {
            self.0.marshal(record)
        }

        fn unmarshal(&mut self, bytes: &[u8]) -> Result<&Record, Error> {
            self.0.unmarshal(bytes)?;
            self.0.dst.frames.pop();
            Ok(&self.0.dst)
        }
    }

    /// Encodes a truncated record.
    struct Truncating(SchemaSerializer);

    impl Serializer for Truncating {
        fn name(&self) -> &str {
            "truncating"
        }

        fn marshal(&mut self, record: &Record) -> Result<&[u8], Error> {
            let bytes = self.0.marshal(record)?;
            Ok(&bytes[..bytes.len() - 1])
        }

        fn unmarshal(&mut self, bytes: &[u8]) -> Result<&Record, Error> {
            self.0.unmarshal(bytes)
        }
    }

    fn records() -> Vec<Record> {
        vec![
            Record::default(),
            Record {
                id: -1,
                tag: 255,
                timestamp: i64::MIN,
                frames: vec![u64::MAX, 0, 42],
                group_id: i64::MAX,
                transaction_id: 7,
            },
        ]
    }

    #[test]
    fn reference_codecs_validate() {
        validate(SchemaSerializer::varint(), &records()).unwrap();
        validate(SchemaSerializer::fixint(), &records()).unwrap();
    }

    #[test]
    fn mismatch_names_field() {
        let err = validate(Lossy(SchemaSerializer::varint()), &records()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Mismatch {
                serializer: "lossy".to_owned(),
                index: 1,
                field: "frames",
            }
        );
    }

    #[test]
    fn codec_error_is_wrapped() {
        let err = validate(Truncating(SchemaSerializer::varint()), &records()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Codec {
                serializer: "truncating".to_owned(),
                index: 0,
                source: Error::ReadSizeLimit(8),
            }
        );
    }

    #[test]
    fn bincode_matches_fixint() {
        let mut bincode = BincodeSerializer::new();
        let mut fixint = SchemaSerializer::fixint();
        validate(&mut bincode, &records()).unwrap();
        for record in records() {
            let expected = fixint.marshal(&record).unwrap().to_vec();
            assert_eq!(bincode.marshal(&record).unwrap(), &expected[..]);
        }
    }

    #[test]
    fn bincode_errors_are_external() {
        let mut bincode = BincodeSerializer::new();
        let bytes = bincode.marshal(&records()[1]).unwrap().to_vec();
        assert!(matches!(
            bincode.unmarshal(&bytes[..20]),
            Err(Error::External(_))
        ));
    }

    #[test]
    fn serializer_by_mut_ref() {
        let mut serializer = SchemaSerializer::varint();
        validate(&mut serializer, &records()).unwrap();
        assert!(serializer.buf.capacity() > 0);
    }

    proptest! {
        #![proptest_config(proptest_cfg())]

        #[test]
        fn formats_agree_on_values(frames in proptest::collection::vec(any::<u64>(), 0..=64)) {
            let record = Record { frames, ..Record::default() };
            let mut varint = SchemaSerializer::varint();
            let mut fixint = SchemaSerializer::fixint();

            let varint_bytes = varint.marshal(&record).unwrap().to_vec();
            let fixint_bytes = fixint.marshal(&record).unwrap().to_vec();
            prop_assert!(varint_bytes.len() <= fixint_bytes.len());
            prop_assert_eq!(varint.unmarshal(&varint_bytes).unwrap(), fixint.unmarshal(&fixint_bytes).unwrap());
        }
    }
}
