//! # 编解码流程
//!
//! 编码：载荷 → 位帧 (加长度头) → 写入载体副本。
//! 解码：载体 → 读取长度头与载荷位 → UTF-8 文本 → 分类。
//!
//! 两个方向都是全有或全无：失败时不会产生部分修改的载体，也不会返回部分载荷。

use crate::capacity::{can_embed, capacity};
use crate::config::CodecPolicy;
use crate::error::{Result, StegoError};
use crate::framer::{frame, unframe};
use crate::payload::{Payload, PayloadKind};
use crate::steganography::{Carrier, read_bits, write_bits};
use log::debug;

/// 将载荷嵌入载体，返回新的载体。
///
/// # Errors
///
/// * 载荷为空时返回 [`StegoError::EmptyPayload`]。
/// * 载荷超过 `policy` 上限时返回 [`StegoError::PayloadTooLarge`]。
/// * 载体容量不足时返回 [`StegoError::CapacityExceeded`]。
pub fn encode_payload(carrier: &Carrier, payload: &Payload, policy: &CodecPolicy) -> Result<Carrier> {
    let wire = payload.to_wire();

    if wire.is_empty() {
        return Err(StegoError::EmptyPayload);
    }

    if wire.len() > policy.max_payload_bytes {
        return Err(StegoError::PayloadTooLarge {
            len: wire.len(),
            max: policy.max_payload_bytes,
        });
    }

    let (width, height) = (carrier.width(), carrier.height());
    if !can_embed(width, height, wire.len()) {
        return Err(StegoError::CapacityExceeded {
            required: wire.len(),
            available: capacity(width, height),
        });
    }

    let bits = frame(&wire)?;
    debug!(
        "Embedding {} {} bytes ({} bits incl. header) into {}x{} carrier",
        wire.len(),
        payload.kind(),
        bits.len(),
        width,
        height
    );

    write_bits(carrier, &bits)
}

/// 将一条文本消息嵌入载体。
pub fn encode_message(carrier: &Carrier, message: &str, policy: &CodecPolicy) -> Result<Carrier> {
    encode_payload(carrier, &Payload::Message(message.to_owned()), policy)
}

/// 将十六进制哈希以 `HASH:` 标记嵌入载体。
pub fn encode_hash(carrier: &Carrier, hash_hex: &str, policy: &CodecPolicy) -> Result<Carrier> {
    encode_payload(carrier, &Payload::Hash(hash_hex.to_owned()), policy)
}

/// 从载体中提取并分类载荷。
///
/// # Errors
///
/// * 长度头无效时返回 [`StegoError::InvalidHeader`]。
/// * 载体在载荷读完之前耗尽时返回 [`StegoError::Truncated`]。
/// * 载荷不是合法 UTF-8 时返回 [`StegoError::UndecodableText`]。
pub fn decode_payload(carrier: &Carrier, policy: &CodecPolicy) -> Result<Payload> {
    let bytes = unframe(read_bits(carrier), policy)?;
    debug!(
        "Extracted {} bytes from {}x{} carrier",
        bytes.len(),
        carrier.width(),
        carrier.height()
    );

    let text = String::from_utf8(bytes).map_err(|_| StegoError::UndecodableText)?;
    Ok(Payload::classify(text))
}

/// 解码并要求载荷属于指定种类。
///
/// # Errors
///
/// 除 [`decode_payload`] 的错误外，种类不符时返回 [`StegoError::WrongPayloadKind`]。
pub fn decode_expecting(carrier: &Carrier, expected: PayloadKind, policy: &CodecPolicy) -> Result<Payload> {
    let payload = decode_payload(carrier, policy)?;
    let found = payload.kind();

    if found != expected {
        return Err(StegoError::WrongPayloadKind { expected, found });
    }

    Ok(payload)
}

/// 粗略判断载体中是否藏有可读内容。
pub fn has_hidden_content(carrier: &Carrier, policy: &CodecPolicy) -> bool {
    decode_payload(carrier, policy).is_ok_and(|payload| !payload.content().is_empty())
}
