//! Schema traits.
//!
//! A schema is a zero-sized type describing how a value is laid out on the
//! wire. The value itself is `Src` (when writing) or `Dst` (when reading), so
//! one Rust type can have several schemas:
//!
//! ```
//! # use serbench::{containers::{self, Elem}, len::{BincodeLen, VarintLen}, Deserialize, Serialize};
//! let frames: Vec<u64> = vec![10, 20, 30];
//!
//! let varint = containers::Vec::<Elem<u64>, VarintLen>::serialize(&frames).unwrap();
//! let fixint = containers::Vec::<Elem<u64>, BincodeLen>::serialize(&frames).unwrap();
//! assert_eq!(varint.len(), 1 + 3 * 8);
//! assert_eq!(fixint.len(), 8 + 3 * 8);
//!
//! let decoded = containers::Vec::<Elem<u64>, VarintLen>::deserialize(&varint).unwrap();
//! assert_eq!(decoded, frames);
//! ```
use {
    crate::{
        error::{size_hint_overflow, size_of_overflow, Result},
        io::*,
        len::SeqLen,
    },
    core::mem::MaybeUninit,
};

pub mod containers;
mod impls;

/// Types that can be written (serialized) to a byte buffer.
pub trait SchemaWrite {
    type Src: ?Sized;
    /// Encoded size when it does not depend on the value.
    const FIXED_SIZE: Option<usize> = None;
    /// Get the serialized size of `Self::Src`.
    fn size_of(src: &Self::Src) -> Result<usize>;
    /// Write `Self::Src` to `writer`.
    fn write(writer: &mut Writer, src: &Self::Src) -> Result<()>;
}

/// Types that can be read (deserialized) from a byte buffer.
pub trait SchemaRead<'de> {
    type Dst;
    /// Encoded size when it does not depend on the value.
    const FIXED_SIZE: Option<usize> = None;

    /// Read into `dst` from `reader`.
    ///
    /// Implementations must initialize `dst` whenever they return `Ok`.
    fn read(reader: &mut Reader<'de>, dst: &mut MaybeUninit<Self::Dst>) -> Result<()>;

    /// Read `Self::Dst` from `reader` into a new `Self::Dst`.
    #[inline(always)]
    fn get(reader: &mut Reader<'de>) -> Result<Self::Dst> {
        let mut value = MaybeUninit::uninit();
        Self::read(reader, &mut value)?;
        // SAFETY: `read` must properly initialize the `Self::Dst`.
        Ok(unsafe { value.assume_init() })
    }

    /// Read into an already initialized `dst`, reusing heap allocations it owns.
    ///
    /// On error `dst` is left valid but unspecified.
    #[inline]
    fn read_in_place(reader: &mut Reader<'de>, dst: &mut Self::Dst) -> Result<()> {
        *dst = Self::get(reader)?;
        Ok(())
    }
}

#[inline(always)]
fn size_of_elem_iter<'a, T, Len>(
    mut value: impl ExactSizeIterator<Item = &'a T::Src>,
) -> Result<usize>
where
    Len: SeqLen,
    T: SchemaWrite + 'a,
{
    let prefix = Len::bytes_needed(value.len())?;
    let elems = match T::FIXED_SIZE {
        Some(size) => value.len().checked_mul(size).ok_or_else(size_of_overflow)?,
        None => value.try_fold(0usize, |acc, x| {
            acc.checked_add(T::size_of(x)?).ok_or_else(size_of_overflow)
        })?,
    };
    prefix.checked_add(elems).ok_or_else(size_of_overflow)
}

#[inline(always)]
fn write_elem_iter<'a, T, Len>(
    writer: &mut Writer,
    src: impl ExactSizeIterator<Item = &'a T::Src>,
) -> Result<()>
where
    Len: SeqLen,
    T: SchemaWrite + 'a,
{
    Len::encode_len(writer, src.len())?;
    for item in src {
        T::write(writer, item)?;
    }
    Ok(())
}

/// Error unless `reader` holds at least `len` elements of fixed size `elem_size`.
#[inline(always)]
fn ensure_elems(reader: &Reader, len: usize, elem_size: usize) -> Result<()> {
    let needed = len
        .checked_mul(elem_size)
        .ok_or_else(|| size_hint_overflow("usize::MAX"))?;
    reader.ensure(needed)
}
