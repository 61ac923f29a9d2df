//! Serialization entry points over [`SchemaWrite`] and [`SchemaRead`].
use crate::{
    error::{writer_trailing_bytes, Result},
    io::{Reader, Writer},
    schema::{SchemaRead, SchemaWrite},
};

/// Helper over [`SchemaWrite`] that provides buffer level serialization.
///
/// Implemented for every [`SchemaWrite`], so schemas that are not their own
/// `Src` can be used directly, e.g. `RecordSchema::<BincodeLen>::serialize(&record)`.
pub trait Serialize: SchemaWrite {
    /// Serialize `src` into a new `Vec<u8>` of exactly [`SchemaWrite::size_of`] bytes.
    #[inline]
    fn serialize(src: &Self::Src) -> Result<Vec<u8>> {
        Self::serialize_reusing(src, Vec::new())
    }

    /// Serialize `src` into `buf`, reusing its allocation when the capacity suffices.
    ///
    /// Any previous contents of `buf` are discarded. When `buf` is too small a
    /// fresh buffer sized for `src` is allocated instead of growing `buf`.
    fn serialize_reusing(src: &Self::Src, mut buf: Vec<u8>) -> Result<Vec<u8>> {
        let size = Self::size_of(src)?;
        buf.clear();
        if buf.capacity() < size {
            buf = Vec::with_capacity(size);
        }
        let mut writer = Writer::from_vec(&mut buf);
        Self::write(&mut writer, src)?;
        let written = writer.finish();
        if written != size {
            return Err(writer_trailing_bytes(size.abs_diff(written)));
        }
        // SAFETY: the writer initialized `written` bytes of spare capacity, starting at len 0.
        unsafe { buf.set_len(written) };
        Ok(buf)
    }

    /// Serialize `src` into the front of `dst`, returning the number of bytes written.
    ///
    /// Fails with [`Error::WriteSizeLimit`](crate::Error::WriteSizeLimit) if `dst`
    /// is too small; nothing past the end of `dst` is touched.
    #[inline]
    fn serialize_into(dst: &mut [u8], src: &Self::Src) -> Result<usize> {
        let mut writer = Writer::from_slice(dst);
        Self::write(&mut writer, src)?;
        Ok(writer.finish())
    }

    /// Get the number of bytes `src` serializes to.
    #[inline]
    fn serialized_size(src: &Self::Src) -> Result<u64> {
        Self::size_of(src).map(|size| size as u64)
    }
}

impl<T> Serialize for T where T: SchemaWrite + ?Sized {}

/// Helper over [`SchemaRead`] that provides buffer level deserialization.
///
/// Trailing bytes after the encoded value are permitted; the `_prefix` and
/// `_in_place` variants report how many bytes were consumed.
pub trait Deserialize<'de>: SchemaRead<'de> {
    #[inline]
    fn deserialize(bytes: &'de [u8]) -> Result<Self::Dst> {
        Self::get(&mut Reader::new(bytes))
    }

    /// Deserialize the value at the front of `bytes`, returning it with the
    /// number of bytes consumed.
    #[inline]
    fn deserialize_prefix(bytes: &'de [u8]) -> Result<(Self::Dst, usize)> {
        let mut reader = Reader::new(bytes);
        let value = Self::get(&mut reader)?;
        Ok((value, reader.position()))
    }

    /// Deserialize into an existing value, reusing its allocations, and return
    /// the number of bytes consumed.
    #[inline]
    fn deserialize_in_place(bytes: &'de [u8], dst: &mut Self::Dst) -> Result<usize> {
        let mut reader = Reader::new(bytes);
        Self::read_in_place(&mut reader, dst)?;
        Ok(reader.position())
    }
}

impl<'de, T> Deserialize<'de> for T where T: SchemaRead<'de> + ?Sized {}

/// Serialize a type whose schema is itself.
#[inline]
pub fn serialize<T>(src: &T) -> Result<Vec<u8>>
where
    T: SchemaWrite<Src = T> + ?Sized,
{
    T::serialize(src)
}

/// Serialize a type whose schema is itself into `buf`, reusing its allocation when possible.
#[inline]
pub fn serialize_reusing<T>(src: &T, buf: Vec<u8>) -> Result<Vec<u8>>
where
    T: SchemaWrite<Src = T> + ?Sized,
{
    T::serialize_reusing(src, buf)
}

/// Serialize a type whose schema is itself into the front of `dst`.
#[inline]
pub fn serialize_into<T>(dst: &mut [u8], src: &T) -> Result<usize>
where
    T: SchemaWrite<Src = T> + ?Sized,
{
    T::serialize_into(dst, src)
}

/// Get the serialized size of a type whose schema is itself.
#[inline]
pub fn serialized_size<T>(src: &T) -> Result<u64>
where
    T: SchemaWrite<Src = T> + ?Sized,
{
    T::serialized_size(src)
}

/// Deserialize a type whose schema is itself.
#[inline]
pub fn deserialize<'de, T>(bytes: &'de [u8]) -> Result<T>
where
    T: SchemaRead<'de, Dst = T>,
{
    T::deserialize(bytes)
}

/// Deserialize a type whose schema is itself, returning the bytes consumed.
#[inline]
pub fn deserialize_prefix<'de, T>(bytes: &'de [u8]) -> Result<(T, usize)>
where
    T: SchemaRead<'de, Dst = T>,
{
    T::deserialize_prefix(bytes)
}

/// Deserialize a type whose schema is itself into an existing value.
#[inline]
pub fn deserialize_in_place<'de, T>(bytes: &'de [u8], dst: &mut T) -> Result<usize>
where
    T: SchemaRead<'de, Dst = T>,
{
    T::deserialize_in_place(bytes, dst)
}
