//! This module provides specialized "container" types that can be used to opt
//! into specialized length encodings.
//!
//! # Examples
//!
//! A `Vec<u64>` with a varint length prefix:
//!
//! ```
//! use serbench::{containers::{self, Elem}, len::VarintLen, Serialize};
//!
//! let frames = vec![1u64, 2, 3];
//! let bytes = containers::Vec::<Elem<u64>, VarintLen>::serialize(&frames).unwrap();
//! assert_eq!(bytes[0], 3);
//! assert_eq!(bytes.len(), 1 + 3 * 8);
//! ```
//!
//! The same vector with bincode's fixint length prefix:
//!
//! ```
//! use serbench::{containers::{self, Elem}, len::BincodeLen, Serialize};
//!
//! let frames = vec![1u64, 2, 3];
//! let bytes = containers::Vec::<Elem<u64>, BincodeLen>::serialize(&frames).unwrap();
//! assert_eq!(bytes, bincode::serialize(&frames).unwrap());
//! ```
use {
    crate::{
        error::Result,
        io::{Reader, Writer},
        len::{BincodeLen, SeqLen},
        schema::{ensure_elems, size_of_elem_iter, write_elem_iter, SchemaRead, SchemaWrite},
    },
    core::{marker::PhantomData, mem::MaybeUninit},
};

/// A [`Vec`](std::vec::Vec) with a customizable length encoding.
pub struct Vec<T, Len = BincodeLen>(PhantomData<Len>, PhantomData<T>);

/// Indicates that the type is an element of a sequence, composable with [`containers`](self).
pub struct Elem<T>(PhantomData<T>);

impl<T, Len> SchemaWrite for Vec<Elem<T>, Len>
where
    Len: SeqLen,
    T: SchemaWrite,
    T::Src: Sized,
{
    type Src = std::vec::Vec<T::Src>;

    #[inline]
    fn size_of(src: &Self::Src) -> Result<usize> {
        size_of_elem_iter::<T, Len>(src.iter())
    }

    #[inline]
    fn write(writer: &mut Writer, src: &Self::Src) -> Result<()> {
        write_elem_iter::<T, Len>(writer, src.iter())
    }
}

impl<'de, T, Len> SchemaRead<'de> for Vec<Elem<T>, Len>
where
    Len: SeqLen,
    T: SchemaRead<'de>,
{
    type Dst = std::vec::Vec<T::Dst>;

    #[inline]
    fn read(reader: &mut Reader<'de>, dst: &mut MaybeUninit<Self::Dst>) -> Result<()> {
        let mut vec = std::vec::Vec::new();
        Self::read_in_place(reader, &mut vec)?;
        dst.write(vec);
        Ok(())
    }

    /// Decodes the length first; `dst` is only reallocated when its capacity
    /// is smaller than the decoded length.
    fn read_in_place(reader: &mut Reader<'de>, dst: &mut Self::Dst) -> Result<()> {
        let len = Len::size_hint_cautious::<T::Dst>(reader)?;
        // Fixed-size elements let a truncated input fail before allocating.
        if let Some(elem_size) = T::FIXED_SIZE {
            ensure_elems(reader, len, elem_size)?;
        }
        dst.clear();
        dst.reserve(len);
        for _ in 0..len {
            dst.push(T::get(reader)?);
        }
        Ok(())
    }
}
