//! # 错误类型模块
//!
//! 隐写编解码与完整性校验的所有失败情况都在 [`StegoError`] 中有各自的变体，
//! 调用方可以根据错误种类分别处理，而不是只拿到一条字符串。

use crate::payload::PayloadKind;
use std::io;
use thiserror::Error;

/// 隐写编码、解码以及哈希校验过程中可能出现的错误。
#[derive(Debug, Error)]
pub enum StegoError {
    /// 载荷位数加上长度头超过了图像 RGB 通道的总数。
    #[error("Payload does not fit in the carrier: required {required} bytes, available {available} bytes")]
    CapacityExceeded { required: usize, available: usize },

    /// 长度头为 0、超过上限或不是整字节数。通常表示图像中没有隐藏数据。
    #[error("No valid hidden payload found (header declares {declared} bits)")]
    InvalidHeader { declared: u32 },

    /// 在读满长度头声明的位数之前，载体的通道就已耗尽。
    #[error("Carrier is truncated: header declares {declared} bits but only {available} could be read")]
    Truncated { declared: usize, available: usize },

    /// 提取出的字节不是合法的 UTF-8 文本。
    #[error("No readable content found in the carrier")]
    UndecodableText,

    /// 解码成功，但载荷种类与调用方期望的不一致。
    #[error("Expected a {expected} payload but the carrier holds a {found}")]
    WrongPayloadKind {
        expected: PayloadKind,
        found: PayloadKind,
    },

    /// 读取待哈希的文件失败。
    #[error("Failed to compute file hash: {0}")]
    HashComputationFailed(#[source] io::Error),

    /// 空载荷无法被解码端区分于“没有数据”，因此拒绝编码。
    #[error("Refusing to embed an empty payload")]
    EmptyPayload,

    /// 载荷超出了策略允许的最大长度。
    #[error("Payload of {len} bytes exceeds the configured maximum of {max} bytes")]
    PayloadTooLarge { len: usize, max: usize },

    /// 像素缓冲区的长度与宽高不符。
    #[error("Invalid carrier buffer: expected {expected} bytes for {width}x{height} RGBA, got {actual}")]
    InvalidCarrier {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// 尚未提取到哈希就请求校验。
    #[error("No hash has been extracted yet")]
    NoHashExtracted,
}

/// 本库统一使用的 `Result` 别名。
pub type Result<T> = std::result::Result<T, StegoError>;
