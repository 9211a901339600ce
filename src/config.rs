//! # 编解码策略
//!
//! 载荷大小上限是一个任意设定的防护值，而不是格式本身的约束，
//! 因此作为可配置的策略传入编码与解码流程。

use crate::constants::{BITS_PER_BYTE, DEFAULT_MAX_PAYLOAD_BYTES};

/// 编码与解码共用的策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecPolicy {
    /// 允许嵌入或提取的最大载荷字节数。
    pub max_payload_bytes: usize,
}

impl CodecPolicy {
    pub fn with_max_payload_bytes(mut self, max_payload_bytes: usize) -> Self {
        self.max_payload_bytes = max_payload_bytes;
        self
    }

    /// 长度头所允许的最大位数。
    pub fn max_payload_bits(&self) -> u64 {
        (self.max_payload_bytes as u64).saturating_mul(BITS_PER_BYTE as u64)
    }
}

impl Default for CodecPolicy {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bound_is_eight_million_bits() {
        assert_eq!(CodecPolicy::default().max_payload_bits(), 8_000_000);
    }

    #[test]
    fn builder_overrides_bound() {
        let policy = CodecPolicy::default().with_max_payload_bytes(16);
        assert_eq!(policy.max_payload_bytes, 16);
        assert_eq!(policy.max_payload_bits(), 128);
    }
}
