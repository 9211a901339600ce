//! # 载荷标记模块
//!
//! 线上格式只有一种：UTF-8 文本。以 `HASH:` 开头的文本表示哈希载荷，
//! 其余均为普通消息。这一约定只在编码与解码的边界处出现，
//! 库内部统一使用带标签的 [`Payload`] 枚举。

use crate::constants::HASH_PREFIX;
use std::fmt;

/// 载荷的种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Message,
    Hash,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message => write!(f, "message"),
            Self::Hash => write!(f, "hash"),
        }
    }
}

/// 已分类的载荷。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// 普通文本消息。
    Message(String),
    /// 小写十六进制的文件摘要，不含 `HASH:` 前缀。
    Hash(String),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Message(_) => PayloadKind::Message,
            Self::Hash(_) => PayloadKind::Hash,
        }
    }

    /// 去掉标记后的内容。
    pub fn content(&self) -> &str {
        match self {
            Self::Message(text) | Self::Hash(text) => text,
        }
    }

    pub fn into_content(self) -> String {
        match self {
            Self::Message(text) | Self::Hash(text) => text,
        }
    }

    /// 写入载体的字节：消息原样输出，哈希加上 `HASH:` 前缀。
    pub fn to_wire(&self) -> Vec<u8> {
        match self {
            Self::Message(text) => text.as_bytes().to_vec(),
            Self::Hash(hex) => format!("{HASH_PREFIX}{hex}").into_bytes(),
        }
    }

    /// 根据前缀对解码出的文本进行分类。
    pub fn classify(text: String) -> Self {
        match text.strip_prefix(HASH_PREFIX) {
            Some(hex) => Self::Hash(hex.to_owned()),
            None => Self::Message(text),
        }
    }
}
