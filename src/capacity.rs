//! # 容量模型
//!
//! 根据载体尺寸计算可嵌入的最大载荷字节数。纯函数，无副作用。

use crate::constants::{BITS_PER_BYTE, HEADER_BITS, USABLE_CHANNELS};

/// 载体中可用于隐写的通道总数 (只计 RGB)。
pub fn channel_slots(width: u32, height: u32) -> u64 {
    (u64::from(width) * u64::from(height)).saturating_mul(USABLE_CHANNELS as u64)
}

/// 计算 `width × height` 的载体最多可以隐藏多少字节。
///
/// 先从 RGB 通道总数中扣除 32 位长度头，再向下取整到字节。
/// 图像太小、连长度头都放不下时返回 0。
pub fn capacity(width: u32, height: u32) -> usize {
    let usable_bits = channel_slots(width, height).saturating_sub(HEADER_BITS as u64);
    usize::try_from(usable_bits / BITS_PER_BYTE as u64).unwrap_or(usize::MAX)
}

/// 判断长度为 `payload_len` 字节的载荷能否嵌入给定尺寸的载体。
pub fn can_embed(width: u32, height: u32, payload_len: usize) -> bool {
    payload_len <= capacity(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_by_ten_holds_33_bytes() {
        // 300 个通道 - 32 位长度头 = 268 位
        assert_eq!(capacity(10, 10), 33);
        assert!(can_embed(10, 10, 2));
        assert!(can_embed(10, 10, 33));
        assert!(!can_embed(10, 10, 34));
    }

    #[test]
    fn tiny_carrier_has_zero_capacity() {
        assert_eq!(capacity(0, 0), 0);
        assert_eq!(capacity(3, 3), 0);
        // 12 个像素 = 36 个通道，扣除长度头后只剩 4 位
        assert_eq!(capacity(4, 3), 0);
        assert!(can_embed(3, 3, 0));
        assert!(!can_embed(3, 3, 1));
    }

    #[test]
    fn large_dimensions_do_not_overflow() {
        let expected = (65_535u64 * 65_535 * 3 - 32) / 8;
        assert_eq!(capacity(65_535, 65_535) as u64, expected);
        assert!(capacity(u32::MAX, u32::MAX) > 0);
    }
}
