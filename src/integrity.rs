//! # 完整性校验模块
//!
//! 计算文件的 SHA-256 摘要 (小写十六进制)，并与从载体中提取出的哈希逐字节比较。
//! 比较区分大小写且不做任何规范化，嵌入端与校验端必须同样使用小写。
//!
//! [`IntegritySession`] 保存“完整性模式”下的解码状态：
//!
//! ```text
//! NoHash --提取成功 (hash)--> HashExtracted --提供候选文件--> Verified(Match | Mismatch)
//! 任意状态 --切换模式 / 重新提取--> NoHash
//! ```

use crate::codec::{decode_expecting, decode_payload};
use crate::config::CodecPolicy;
use crate::constants::HASH_BLOCK_SIZE;
use crate::error::{Result, StegoError};
use crate::payload::PayloadKind;
use crate::steganography::Carrier;
use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// 计算字节内容的 SHA-256 摘要，返回 64 个小写十六进制字符。
pub fn compute_file_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// 以固定大小的块流式读取并计算 SHA-256 摘要。
///
/// # Errors
///
/// 读取失败时返回 [`StegoError::HashComputationFailed`]。
pub fn hash_reader<R: Read>(mut reader: R) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut block = [0u8; HASH_BLOCK_SIZE];

    loop {
        let read = match reader.read(&mut block) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(StegoError::HashComputationFailed(e)),
        };
        hasher.update(&block[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// 计算磁盘上文件的 SHA-256 摘要。
///
/// # Errors
///
/// 文件无法打开或读取时返回 [`StegoError::HashComputationFailed`]。
pub fn hash_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(StegoError::HashComputationFailed)?;
    let digest = hash_reader(file)?;
    debug!("SHA-256 of {}: {}", path.display(), digest);
    Ok(digest)
}

/// 校验结果。不匹配不是错误，而是一种正常的结论。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Match,
    Mismatch,
}

impl Verification {
    pub fn is_match(self) -> bool {
        self == Self::Match
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::Mismatch => write!(f, "mismatch"),
        }
    }
}

/// 用提取出的哈希校验候选文件内容。
pub fn verify(extracted_hash_hex: &str, candidate: &[u8]) -> Verification {
    if compute_file_hash(candidate) == extracted_hash_hex {
        Verification::Match
    } else {
        Verification::Mismatch
    }
}

/// 解码模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// 接受任何种类的载荷。
    #[default]
    Normal,
    /// 只接受哈希载荷，并可用于后续校验。
    Integrity,
}

/// 会话当前所处的状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoHash,
    HashExtracted,
    Verified(Verification),
}

/// 完整性校验会话：保存最近一次提取出的哈希以及校验结果。
#[derive(Debug, Clone, Default)]
pub struct IntegritySession {
    mode: DecodeMode,
    extracted_hash: Option<String>,
    verification: Option<Verification>,
    policy: CodecPolicy,
}

impl IntegritySession {
    pub fn new(mode: DecodeMode, policy: CodecPolicy) -> Self {
        Self {
            mode,
            policy,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    pub fn extracted_hash(&self) -> Option<&str> {
        self.extracted_hash.as_deref()
    }

    pub fn state(&self) -> SessionState {
        match (&self.extracted_hash, self.verification) {
            (None, _) => SessionState::NoHash,
            (Some(_), None) => SessionState::HashExtracted,
            (Some(_), Some(verification)) => SessionState::Verified(verification),
        }
    }

    fn reset(&mut self) {
        self.extracted_hash = None;
        self.verification = None;
    }

    /// 切换解码模式，同时清除已提取的哈希和校验结果。
    pub fn switch_mode(&mut self, mode: DecodeMode) {
        self.mode = mode;
        self.reset();
    }

    /// 从载体中提取哈希。
    ///
    /// 每次调用都会先清空之前的状态；失败后状态保持为 [`SessionState::NoHash`]。
    ///
    /// # Errors
    ///
    /// 解码失败时返回相应的解码错误；完整性模式下载荷为普通消息时返回
    /// [`StegoError::WrongPayloadKind`]。普通模式下提取到消息时返回 `Ok(None)`。
    pub fn extract(&mut self, carrier: &Carrier) -> Result<Option<&str>> {
        self.reset();

        let decoded = match self.mode {
            DecodeMode::Integrity => decode_expecting(carrier, PayloadKind::Hash, &self.policy),
            DecodeMode::Normal => decode_payload(carrier, &self.policy),
        };

        let payload = decoded.inspect_err(|e| warn!("Hash extraction failed: {e}"))?;
        if payload.kind() != PayloadKind::Hash {
            return Ok(None);
        }

        info!("Extracted hash {}", payload.content());
        self.extracted_hash = Some(payload.into_content());
        Ok(self.extracted_hash.as_deref())
    }

    /// 用当前提取出的哈希校验候选文件内容，并记录结果。
    ///
    /// # Errors
    ///
    /// 尚未提取哈希时返回 [`StegoError::NoHashExtracted`]。
    pub fn verify_candidate(&mut self, candidate: &[u8]) -> Result<Verification> {
        let expected = self
            .extracted_hash
            .as_deref()
            .ok_or(StegoError::NoHashExtracted)?;

        let verification = verify(expected, candidate);
        info!("Integrity check: {verification}");
        self.verification = Some(verification);
        Ok(verification)
    }
}
