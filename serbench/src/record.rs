//! The benchmarked record and its positional binary encoding.
//!
//! # Layout
//!
//! | Offset      | Field            | Width                |
//! |-------------|------------------|----------------------|
//! | 0           | `id`             | 8                    |
//! | 8           | `tag`            | 1                    |
//! | 9           | `timestamp`      | 8                    |
//! | 17          | `frames.len()`   | 1–10 (length prefix) |
//! | 17+v        | `frames`         | 8 each               |
//! | 17+v+8n     | `group_id`       | 8                    |
//! | 25+v+8n     | `transaction_id` | 8                    |
//!
//! Fixed-width fields are little-endian. There is no header, tag or version:
//! readers must know the layout out of band. The length prefix encoding is
//! chosen by the `Len` parameter of [`RecordSchema`]; [`Record`]'s own
//! [`SchemaWrite`]/[`SchemaRead`] impls use [`VarintLen`].
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
//! let bytes = record.marshal(Vec::new()).unwrap();
//! assert_eq!(bytes.len(), 50);
//!
//! let (decoded, consumed) = Record::unmarshal(&bytes).unwrap();
//! assert_eq!(decoded, record);
//! assert_eq!(consumed, 50);
//! ```
use {
    crate::{
        codec::{deserialize_in_place, deserialize_prefix, serialize_into, serialize_reusing},
        containers::{self, Elem},
        error::{size_of_overflow, Result},
        io::{Reader, Writer},
        len::{SeqLen, VarintLen},
        schema::{SchemaRead, SchemaWrite},
        varint::varint_len,
    },
    core::{marker::PhantomData, mem::MaybeUninit},
};

/// Encoded size of every field except the frames sequence and its length prefix.
pub const FIXED_FIELDS_SIZE: usize = 33;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Record {
    pub id: i64,
    pub tag: u8,
    pub timestamp: i64,
    pub frames: Vec<u64>,
    pub group_id: i64,
    pub transaction_id: u64,
}

impl Record {
    /// Exact number of bytes [`Record::marshal`] produces.
    #[inline]
    pub fn size(&self) -> usize {
        let len = self.frames.len();
        FIXED_FIELDS_SIZE + varint_len(len as u64) + len * size_of::<u64>()
    }

    /// Encode into `buf`, reusing its allocation when its capacity is at least
    /// [`Record::size`]; otherwise a buffer of exactly that size is allocated.
    ///
    /// The returned buffer holds exactly the encoded bytes. Pass `Vec::new()`
    /// when there is no buffer to reuse.
    #[inline]
    pub fn marshal(&self, buf: Vec<u8>) -> Result<Vec<u8>> {
        serialize_reusing(self, buf)
    }

    /// Encode into the front of a fixed-capacity slice, returning the bytes written.
    #[inline]
    pub fn marshal_into(&self, dst: &mut [u8]) -> Result<usize> {
        serialize_into(dst, self)
    }

    /// Decode the record at the front of `bytes`.
    ///
    /// Returns the record and the number of bytes it occupied; anything after
    /// that belongs to the caller.
    #[inline]
    pub fn unmarshal(bytes: &[u8]) -> Result<(Self, usize)> {
        deserialize_prefix(bytes)
    }

    /// Decode into `self`, keeping the `frames` allocation when it is large enough.
    #[inline]
    pub fn unmarshal_into(&mut self, bytes: &[u8]) -> Result<usize> {
        deserialize_in_place(bytes, self)
    }

    /// Name of the first field, in layout order, whose value differs from `other`.
    pub fn first_mismatch(&self, other: &Self) -> Option<&'static str> {
        if self.id != other.id {
            Some("id")
        } else if self.tag != other.tag {
            Some("tag")
        } else if self.timestamp != other.timestamp {
            Some("timestamp")
        } else if self.frames != other.frames {
            Some("frames")
        } else if self.group_id != other.group_id {
            Some("group_id")
        } else if self.transaction_id != other.transaction_id {
            Some("transaction_id")
        } else {
            None
        }
    }
}

/// Schema for [`Record`] with a pluggable frames length encoding.
///
/// `RecordSchema<VarintLen>` is the reference codec;
/// `RecordSchema<BincodeLen>` produces the same bytes as `bincode` 1.x.
/// The preallocation cap on `frames` is carried by `Len`:
///
/// ```
/// use serbench::{len::VarintLen, Deserialize, Error, Record, RecordSchema};
///
/// let record = Record { frames: vec![0; 100], ..Record::default() };
/// let bytes = record.marshal(Vec::new()).unwrap();
///
/// // At most 64 frames (512 bytes).
/// type Capped = RecordSchema<VarintLen<512>>;
/// assert!(matches!(
///     Capped::deserialize(&bytes),
///     Err(Error::PreallocationSizeLimit { needed: 800, limit: 512 })
/// ));
/// ```
pub struct RecordSchema<Len = VarintLen>(PhantomData<Len>);

type Frames<Len> = containers::Vec<Elem<u64>, Len>;

impl<Len: SeqLen> SchemaWrite for RecordSchema<Len> {
    type Src = Record;

    #[inline]
    fn size_of(src: &Self::Src) -> Result<usize> {
        FIXED_FIELDS_SIZE
            .checked_add(<Frames<Len>>::size_of(&src.frames)?)
            .ok_or_else(size_of_overflow)
    }

    #[inline]
    fn write(writer: &mut Writer, src: &Self::Src) -> Result<()> {
        i64::write(writer, &src.id)?;
        u8::write(writer, &src.tag)?;
        i64::write(writer, &src.timestamp)?;
        <Frames<Len>>::write(writer, &src.frames)?;
        i64::write(writer, &src.group_id)?;
        u64::write(writer, &src.transaction_id)
    }
}

impl<'de, Len: SeqLen> SchemaRead<'de> for RecordSchema<Len> {
    type Dst = Record;

    #[inline]
    fn read(reader: &mut Reader<'de>, dst: &mut MaybeUninit<Self::Dst>) -> Result<()> {
        let mut record = Record::default();
        Self::read_in_place(reader, &mut record)?;
        dst.write(record);
        Ok(())
    }

    fn read_in_place(reader: &mut Reader<'de>, dst: &mut Self::Dst) -> Result<()> {
        reader.ensure(FIXED_FIELDS_SIZE)?;
        dst.id = i64::get(reader)?;
        dst.tag = u8::get(reader)?;
        dst.timestamp = i64::get(reader)?;
        <Frames<Len>>::read_in_place(reader, &mut dst.frames)?;
        dst.group_id = i64::get(reader)?;
        dst.transaction_id = u64::get(reader)?;
        Ok(())
    }
}

impl SchemaWrite for Record {
    type Src = Record;

    #[inline]
    fn size_of(src: &Self::Src) -> Result<usize> {
        Ok(src.size())
    }

    #[inline]
    fn write(writer: &mut Writer, src: &Self::Src) -> Result<()> {
        RecordSchema::<VarintLen>::write(writer, src)
    }
}

impl<'de> SchemaRead<'de> for Record {
    type Dst = Record;

    #[inline]
    fn read(reader: &mut Reader<'de>, dst: &mut MaybeUninit<Self::Dst>) -> Result<()> {
        RecordSchema::<VarintLen>::read(reader, dst)
    }

    #[inline]
    fn read_in_place(reader: &mut Reader<'de>, dst: &mut Self::Dst) -> Result<()> {
        RecordSchema::<VarintLen>::read_in_place(reader, dst)
    }
}
