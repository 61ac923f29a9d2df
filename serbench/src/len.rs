//! Support for heterogenous sequence length encoding.
use crate::{
    error::{pointer_sized_decode_error, preallocation_size_limit, size_hint_overflow, Result},
    io::{Reader, Writer},
    varint::{decode_varint, encode_varint, varint_len},
};

/// Behavior to support heterogenous sequence length encoding.
///
/// It is possible for sequences to have different length encoding schemes.
/// This trait abstracts over that possibility, allowing users to specify
/// the length encoding scheme for a sequence.
pub trait SeqLen {
    /// Read the length of a sequence from the reader.
    fn size_hint(reader: &mut Reader) -> Result<usize>;
    /// Get the length of a sequence from the reader, potentially
    /// returning an error if some length condition is not met
    /// (e.g., size constraints, overflow, etc.).
    #[inline(always)]
    fn size_hint_cautious<T>(reader: &mut Reader) -> Result<usize> {
        Self::size_hint(reader)
    }
    /// Write the length of a sequence to the writer.
    fn encode_len(writer: &mut Writer, len: usize) -> Result<()>;
    /// Calculate the number of bytes needed to encode the given length.
    ///
    /// Useful for variable length encoding schemes.
    fn bytes_needed(len: usize) -> Result<usize>;
}

const DEFAULT_LEN_MAX_SIZE: usize = 4 << 20; // 4 MiB

/// Reject `len` elements of `T` if they would preallocate more than `max_size` bytes.
#[inline(always)]
fn check_preallocation<T>(len: usize, max_size: usize) -> Result<usize> {
    let needed = len
        .checked_mul(size_of::<T>())
        .ok_or_else(|| size_hint_overflow("usize::MAX"))?;
    if needed > max_size {
        tracing::debug!(
            len,
            needed,
            limit = max_size,
            "rejecting sequence over preallocation limit"
        );
        return Err(preallocation_size_limit(needed, max_size));
    }
    Ok(len)
}

/// [`SeqLen`] implementation for LEB128 varint lengths.
///
/// `MAX_SIZE` caps the preallocation size (in bytes) for heap allocated
/// structures, guarding against input that claims an enormous length.
/// The default is 4 MiB.
pub struct VarintLen<const MAX_SIZE: usize = DEFAULT_LEN_MAX_SIZE>;

impl<const MAX_SIZE: usize> SeqLen for VarintLen<MAX_SIZE> {
    #[inline(always)]
    fn size_hint(reader: &mut Reader) -> Result<usize> {
        usize::try_from(decode_varint(reader)?).map_err(|_| pointer_sized_decode_error())
    }

    #[inline(always)]
    fn size_hint_cautious<T>(reader: &mut Reader) -> Result<usize> {
        check_preallocation::<T>(Self::size_hint(reader)?, MAX_SIZE)
    }

    #[inline(always)]
    fn encode_len(writer: &mut Writer, len: usize) -> Result<()> {
        encode_varint(writer, len as u64)
    }

    #[inline(always)]
    fn bytes_needed(len: usize) -> Result<usize> {
        Ok(varint_len(len as u64))
    }
}

/// [`SeqLen`] implementation for bincode's default fixint encoding.
///
/// Same preallocation semantics as [`VarintLen`].
pub struct BincodeLen<const MAX_SIZE: usize = DEFAULT_LEN_MAX_SIZE>;

impl<const MAX_SIZE: usize> SeqLen for BincodeLen<MAX_SIZE> {
    /// Bincode's default fixint encoding writes lengths as `u64`.
    #[inline(always)]
    fn size_hint(reader: &mut Reader) -> Result<usize> {
        let len = u64::from_le_bytes(reader.read_array()?);
        usize::try_from(len).map_err(|_| pointer_sized_decode_error())
    }

    #[inline(always)]
    fn size_hint_cautious<T>(reader: &mut Reader) -> Result<usize> {
        check_preallocation::<T>(Self::size_hint(reader)?, MAX_SIZE)
    }

    #[inline(always)]
    fn encode_len(writer: &mut Writer, len: usize) -> Result<()> {
        writer.write_exact(&(len as u64).to_le_bytes())
    }

    #[inline(always)]
    fn bytes_needed(_len: usize) -> Result<usize> {
        Ok(size_of::<u64>())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{error::Error, proptest_config::proptest_cfg},
        proptest::prelude::*,
    };

    fn encode<L: SeqLen>(len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; L::bytes_needed(len).unwrap()];
        let mut writer = Writer::from_slice(&mut buf);
        L::encode_len(&mut writer, len).unwrap();
        writer.finish_disallow_trailing_bytes().unwrap();
        buf
    }

    #[test]
    fn varint_len_prefix_boundaries() {
        assert_eq!(encode::<VarintLen>(127).len(), 1);
        assert_eq!(encode::<VarintLen>(128).len(), 2);
        assert_eq!(encode::<VarintLen>(16384).len(), 3);
    }

    #[test]
    fn preallocation_limit() {
        let bytes = encode::<VarintLen>(3);
        let mut reader = Reader::new(&bytes);
        assert_eq!(
            VarintLen::<16>::size_hint_cautious::<u64>(&mut reader),
            Err(Error::PreallocationSizeLimit {
                needed: 24,
                limit: 16
            })
        );

        let mut reader = Reader::new(&bytes);
        assert_eq!(VarintLen::<24>::size_hint_cautious::<u64>(&mut reader), Ok(3));
    }

    #[test]
    fn preallocation_overflow() {
        let bytes = encode::<BincodeLen>(usize::MAX);
        let mut reader = Reader::new(&bytes);
        assert_eq!(
            BincodeLen::<{ usize::MAX }>::size_hint_cautious::<u64>(&mut reader),
            Err(Error::SizeHintOverflow("usize::MAX"))
        );
    }

    proptest! {
        #![proptest_config(proptest_cfg())]

        #[test]
        fn bincode_len_matches_bincode(len in any::<u32>()) {
            let len = len as usize;
            prop_assert_eq!(encode::<BincodeLen>(len), bincode::serialize(&(len as u64)).unwrap());
        }

        #[test]
        fn varint_len_roundtrip(len in any::<u32>()) {
            let len = len as usize;
            let bytes = encode::<VarintLen>(len);
            let mut reader = Reader::new(&bytes);
            prop_assert_eq!(VarintLen::<{ usize::MAX }>::size_hint(&mut reader).unwrap(), len);
            prop_assert_eq!(reader.remaining(), 0);
        }
    }
}
