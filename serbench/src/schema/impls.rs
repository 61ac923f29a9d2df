//! Blanket implementations for std types.
//!
//! Integers are written little-endian through `to_le_bytes`/`from_le_bytes`,
//! so the encoding does not depend on the host's byte order.
//!
//! `Vec<T>` assumes [`BincodeLen`], because there is no way to specify a
//! different length encoding without one of the [`containers`].
use {
    crate::{
        containers::{self, Elem},
        error::Result,
        io::{Reader, Writer},
        len::BincodeLen,
        schema::{SchemaRead, SchemaWrite},
    },
    core::mem::MaybeUninit,
};

macro_rules! impl_int {
    ($($type:ty),+ $(,)?) => {$(
        impl SchemaWrite for $type {
            type Src = $type;
            const FIXED_SIZE: Option<usize> = Some(size_of::<$type>());

            #[inline(always)]
            fn size_of(_src: &Self::Src) -> Result<usize> {
                Ok(size_of::<$type>())
            }

            #[inline(always)]
            fn write(writer: &mut Writer, src: &Self::Src) -> Result<()> {
                writer.write_exact(&src.to_le_bytes())
            }
        }

        impl SchemaRead<'_> for $type {
            type Dst = $type;
            const FIXED_SIZE: Option<usize> = Some(size_of::<$type>());

            #[inline(always)]
            fn read(reader: &mut Reader, dst: &mut MaybeUninit<Self::Dst>) -> Result<()> {
                dst.write(<$type>::from_le_bytes(reader.read_array()?));
                Ok(())
            }

            #[inline(always)]
            fn get(reader: &mut Reader) -> Result<Self::Dst> {
                Ok(<$type>::from_le_bytes(reader.read_array()?))
            }
        }
    )+};
}

impl_int!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128);

impl<T> SchemaWrite for Vec<T>
where
    T: SchemaWrite,
    T::Src: Sized,
{
    type Src = Vec<T::Src>;

    #[inline]
    fn size_of(value: &Self::Src) -> Result<usize> {
        <containers::Vec<Elem<T>, BincodeLen>>::size_of(value)
    }

    #[inline]
    fn write(writer: &mut Writer, value: &Self::Src) -> Result<()> {
        <containers::Vec<Elem<T>, BincodeLen>>::write(writer, value)
    }
}

impl<'de, T> SchemaRead<'de> for Vec<T>
where
    T: SchemaRead<'de>,
{
    type Dst = Vec<T::Dst>;

    #[inline]
    fn read(reader: &mut Reader<'de>, dst: &mut MaybeUninit<Self::Dst>) -> Result<()> {
        <containers::Vec<Elem<T>, BincodeLen>>::read(reader, dst)
    }

    #[inline]
    fn read_in_place(reader: &mut Reader<'de>, dst: &mut Self::Dst) -> Result<()> {
        <containers::Vec<Elem<T>, BincodeLen>>::read_in_place(reader, dst)
    }
}
