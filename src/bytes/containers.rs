//! Sequence, set and map codecs.
//!
//! All containers share one wire form: a 32-bit element count followed by
//! the elements in iteration order. Map elements are key then value.

use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};

use crate::block::BlockAllocator;
use crate::bytes::{Decode, Encode};
use crate::error::{OversizeCountSnafu, Result};
use crate::pack::Pack;
use crate::unpack::Unpack;

fn push_count<A: BlockAllocator>(pack: &mut Pack<'_, A>, len: usize) -> Result<()> {
    let count = u32::try_from(len).map_err(|_| OversizeCountSnafu { len }.build())?;
    pack.push_u32(count)?;
    Ok(())
}

/// Pre-allocation bound: never reserve more bytes of `T` than bytes of
/// input remain.
fn capacity_hint<T>(unpack: &mut Unpack<'_>) -> Result<usize> {
    let count = unpack.peek_u32()? as usize;
    Ok(count.min(unpack.remaining() / size_of::<T>().max(1)))
}

/// Encode a sequence as a count followed by each element.
pub fn encode_seq<'i, T, I, A>(pack: &mut Pack<'_, A>, items: I) -> Result<()>
where
    T: Encode + 'i,
    I: IntoIterator<Item = &'i T>,
    I::IntoIter: ExactSizeIterator,
    A: BlockAllocator,
{
    let items = items.into_iter();
    push_count(pack, items.len())?;
    for item in items {
        item.encode(pack)?;
    }
    Ok(())
}

/// Decode a sequence, appending each element to `out` in wire order.
///
/// The count is trusted only as far as the input backs it: elements that
/// occupy bytes run out of input and fail with a short read. Elements with
/// an empty wire form, such as `()` or [`Void`](crate::Void), consume
/// nothing, so a 4-byte count alone can request up to `u32::MAX` of them.
pub fn decode_seq_into<T, C>(unpack: &mut Unpack<'_>, out: &mut C) -> Result<()>
where
    T: Decode,
    C: Extend<T>,
{
    let count = unpack.pop_u32()?;
    for _ in 0..count {
        let item = T::decode(unpack)?;
        out.extend(Some(item));
    }
    Ok(())
}

/// Encode key/value pairs as a count followed by key then value.
pub fn encode_map<'i, K, V, I, A>(pack: &mut Pack<'_, A>, entries: I) -> Result<()>
where
    K: Encode + 'i,
    V: Encode + 'i,
    I: IntoIterator<Item = (&'i K, &'i V)>,
    I::IntoIter: ExactSizeIterator,
    A: BlockAllocator,
{
    let entries = entries.into_iter();
    push_count(pack, entries.len())?;
    for (key, value) in entries {
        key.encode(pack)?;
        value.encode(pack)?;
    }
    Ok(())
}

/// Decode key/value pairs into `out`.
///
/// Duplicate keys follow the container's `Extend` rule.
pub fn decode_map_into<K, V, C>(unpack: &mut Unpack<'_>, out: &mut C) -> Result<()>
where
    K: Decode,
    V: Decode,
    C: Extend<(K, V)>,
{
    let count = unpack.pop_u32()?;
    for _ in 0..count {
        let key = K::decode(unpack)?;
        let value = V::decode(unpack)?;
        out.extend(Some((key, value)));
    }
    Ok(())
}

impl<T: Encode> Encode for [T] {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        encode_seq(pack, self)
    }
}

impl<T: Encode> Encode for Vec<T> {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        encode_seq(pack, self)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        let mut out = Vec::with_capacity(capacity_hint::<T>(unpack)?);
        decode_seq_into(unpack, &mut out)?;
        Ok(out)
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        encode_seq(pack, self)
    }
}

impl<T: Decode> Decode for VecDeque<T> {
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        let mut out = VecDeque::with_capacity(capacity_hint::<T>(unpack)?);
        decode_seq_into(unpack, &mut out)?;
        Ok(out)
    }
}

impl<T: Encode> Encode for BTreeSet<T> {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        encode_seq(pack, self)
    }
}

impl<T: Decode + Ord> Decode for BTreeSet<T> {
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        let mut out = BTreeSet::new();
        decode_seq_into(unpack, &mut out)?;
        Ok(out)
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        encode_map(pack, self)
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        let mut out = BTreeMap::new();
        decode_map_into(unpack, &mut out)?;
        Ok(out)
    }
}

impl<T: Encode, S> Encode for hashbrown::HashSet<T, S> {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        encode_seq(pack, self)
    }
}

impl<T, S> Decode for hashbrown::HashSet<T, S>
where
    T: Decode + Eq + Hash,
    S: BuildHasher + Default,
{
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        let hint = capacity_hint::<T>(unpack)?;
        let mut out = hashbrown::HashSet::with_capacity_and_hasher(hint, S::default());
        decode_seq_into(unpack, &mut out)?;
        Ok(out)
    }
}

impl<K: Encode, V: Encode, S> Encode for hashbrown::HashMap<K, V, S> {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        encode_map(pack, self)
    }
}

impl<K, V, S> Decode for hashbrown::HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        let hint = capacity_hint::<(K, V)>(unpack)?;
        let mut out = hashbrown::HashMap::with_capacity_and_hasher(hint, S::default());
        decode_map_into(unpack, &mut out)?;
        Ok(out)
    }
}

#[cfg(feature = "std")]
impl<T: Encode, S> Encode for std::collections::HashSet<T, S> {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        encode_seq(pack, self)
    }
}

#[cfg(feature = "std")]
impl<T, S> Decode for std::collections::HashSet<T, S>
where
    T: Decode + Eq + Hash,
    S: BuildHasher + Default,
{
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        let hint = capacity_hint::<T>(unpack)?;
        let mut out = std::collections::HashSet::with_capacity_and_hasher(hint, S::default());
        decode_seq_into(unpack, &mut out)?;
        Ok(out)
    }
}

#[cfg(feature = "std")]
impl<K: Encode, V: Encode, S> Encode for std::collections::HashMap<K, V, S> {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        encode_map(pack, self)
    }
}

#[cfg(feature = "std")]
impl<K, V, S> Decode for std::collections::HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        let hint = capacity_hint::<(K, V)>(unpack)?;
        let mut out = std::collections::HashMap::with_capacity_and_hasher(hint, S::default());
        decode_map_into(unpack, &mut out)?;
        Ok(out)
    }
}
