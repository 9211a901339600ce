//! # 位帧模块
//!
//! 把字节载荷转换成自定界的位流，以及从位流中还原载荷：
//!
//! ```text
//! [32 bits] 载荷位数 (u32, MSB 优先)
//! [N bits ] 载荷本体，每个字节 MSB 优先
//! ```
//!
//! 长度头记录的是**位数** (`len * 8`)，不是字节数。改动这一单位会破坏与
//! 既有载体的兼容性。

use crate::config::CodecPolicy;
use crate::constants::{BITS_PER_BYTE, HEADER_BITS};
use crate::error::{Result, StegoError};

/// 将载荷编码为 `长度头 ++ 载荷位` 的位流。
///
/// # Errors
///
/// 载荷位数超出 `u32` 范围时返回 [`StegoError::PayloadTooLarge`]。
pub fn frame(payload: &[u8]) -> Result<Vec<bool>> {
    let bit_count = payload
        .len()
        .checked_mul(BITS_PER_BYTE)
        .and_then(|bits| u32::try_from(bits).ok())
        .ok_or(StegoError::PayloadTooLarge {
            len: payload.len(),
            max: u32::MAX as usize / BITS_PER_BYTE,
        })?;

    let mut bits = Vec::with_capacity(HEADER_BITS + payload.len() * BITS_PER_BYTE);
    bits.extend((0..HEADER_BITS).rev().map(|i| (bit_count >> i) & 1 == 1));
    for &byte in payload {
        bits.extend((0..BITS_PER_BYTE).rev().map(|i| (byte >> i) & 1 == 1));
    }

    Ok(bits)
}

/// 从按需产出的位流中还原载荷。
///
/// 先读取 32 位长度头并校验，再恰好读取声明的位数，每 8 位组成一个字节。
///
/// # Errors
///
/// * 长度头为 0、不是 8 的倍数或超过 `policy` 上限时返回 [`StegoError::InvalidHeader`]。
/// * 位流在长度头或载荷读完之前耗尽时返回 [`StegoError::Truncated`]。
pub fn unframe<I>(bits: I, policy: &CodecPolicy) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = bool>,
{
    let mut bits = bits.into_iter();

    let mut declared: u32 = 0;
    for read in 0..HEADER_BITS {
        let bit = bits.next().ok_or(StegoError::Truncated {
            declared: HEADER_BITS,
            available: read,
        })?;
        declared = (declared << 1) | u32::from(bit);
    }

    if declared == 0
        || u64::from(declared) > policy.max_payload_bits()
        || declared as usize % BITS_PER_BYTE != 0
    {
        return Err(StegoError::InvalidHeader { declared });
    }

    let declared = declared as usize;
    let mut payload = Vec::with_capacity(declared / BITS_PER_BYTE);
    let mut read = 0;
    while read < declared {
        let mut byte = 0u8;
        for _ in 0..BITS_PER_BYTE {
            let bit = bits.next().ok_or(StegoError::Truncated {
                declared,
                available: read,
            })?;
            byte = (byte << 1) | u8::from(bit);
            read += 1;
        }
        payload.push(byte);
    }

    Ok(payload)
}
