use alloc::string::String;
use alloc::vec::Vec;

use crate::block::BlockAllocator;
use crate::bytes::{Decode, Encode};
use crate::error::{InvalidDataSnafu, Result};
use crate::pack::Pack;
use crate::unpack::Unpack;

// Fixed-width scalars map straight onto the cursor primitives.
macro_rules! impl_codec_for_scalar {
    ($($ty:ty => $push:ident, $pop:ident;)+) => {
        $(
            impl Encode for $ty {
                #[inline]
                fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
                    pack.$push(*self)?;
                    Ok(())
                }
            }

            impl Decode for $ty {
                #[inline]
                fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
                    unpack.$pop()
                }
            }
        )+
    };
}

impl_codec_for_scalar! {
    bool => push_bool, pop_bool;
    u8 => push_u8, pop_u8;
    u16 => push_u16, pop_u16;
    u32 => push_u32, pop_u32;
    u64 => push_u64, pop_u64;
    i8 => push_i8, pop_i8;
    i16 => push_i16, pop_i16;
    i32 => push_i32, pop_i32;
    i64 => push_i64, pop_i64;
    f32 => push_f32, pop_f32;
    f64 => push_f64, pop_f64;
}

// usize/isize travel as 64-bit for portability
impl Encode for usize {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        pack.push_u64(*self as u64)?;
        Ok(())
    }
}

impl Decode for usize {
    #[inline]
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        let value = unpack.pop_u64()?;
        usize::try_from(value).map_err(|_| {
            InvalidDataSnafu {
                message: "usize out of range for this platform",
            }
            .build()
        })
    }
}

impl Encode for isize {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        pack.push_i64(*self as i64)?;
        Ok(())
    }
}

impl Decode for isize {
    #[inline]
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        let value = unpack.pop_i64()?;
        isize::try_from(value).map_err(|_| {
            InvalidDataSnafu {
                message: "isize out of range for this platform",
            }
            .build()
        })
    }
}

impl Encode for char {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        pack.push_u32(u32::from(*self))?;
        Ok(())
    }
}

impl Decode for char {
    #[inline]
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        let code = unpack.pop_u32()?;
        char::from_u32(code).ok_or_else(|| {
            InvalidDataSnafu {
                message: "invalid char codepoint",
            }
            .build()
        })
    }
}

impl Encode for () {
    #[inline]
    fn encode<A: BlockAllocator>(&self, _pack: &mut Pack<'_, A>) -> Result<()> {
        Ok(())
    }
}

impl Decode for () {
    #[inline]
    fn decode(_unpack: &mut Unpack<'_>) -> Result<Self> {
        Ok(())
    }
}

// Strings use the 16-bit length prefix; the long form is explicit on the cursors.
impl Encode for str {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        pack.push_string(self)?;
        Ok(())
    }
}

impl Encode for String {
    #[inline]
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        self.as_str().encode(pack)
    }
}

impl Decode for String {
    #[inline]
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        unpack.pop_string()
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        self.iter().try_for_each(|item| item.encode(pack))
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        let items = (0..N)
            .map(|_| T::decode(unpack))
            .collect::<Result<Vec<T>>>()?;
        items.try_into().map_err(|_| {
            InvalidDataSnafu {
                message: "array length mismatch",
            }
            .build()
        })
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
        match self {
            None => {
                pack.push_u8(0)?;
                Ok(())
            }
            Some(value) => {
                pack.push_u8(1)?;
                value.encode(pack)
            }
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
        match unpack.pop_u8()? {
            0 => Ok(None),
            1 => T::decode(unpack).map(Some),
            _ => InvalidDataSnafu {
                message: "Option discriminant must be 0 or 1",
            }
            .fail(),
        }
    }
}

// Tuples encode their fields in order; a pair is first then second.
macro_rules! impl_codec_for_tuple {
    ($(($($name:ident),+))+) => {
        $(
            impl<$($name: Encode),+> Encode for ($($name,)+) {
                #[allow(non_snake_case)]
                fn encode<A: BlockAllocator>(&self, pack: &mut Pack<'_, A>) -> Result<()> {
                    let ($($name,)+) = self;
                    $($name.encode(pack)?;)+
                    Ok(())
                }
            }

            impl<$($name: Decode),+> Decode for ($($name,)+) {
                fn decode(unpack: &mut Unpack<'_>) -> Result<Self> {
                    Ok(($($name::decode(unpack)?,)+))
                }
            }
        )+
    };
}

impl_codec_for_tuple! {
    (T1)
    (T1, T2)
    (T1, T2, T3)
    (T1, T2, T3, T4)
}
