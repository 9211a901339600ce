//! # lsb_seal 库
//!
//! 本库包含 LSB 隐写编解码器与基于它的文件完整性校验协议的核心逻辑。
//! 载体以解码后的 RGBA 像素缓冲区表示，与具体的图像文件格式无关。

// 声明库包含的所有模块。

pub mod capacity;
pub mod cli;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod framer;
pub mod handler;
pub mod integrity;
pub mod payload;
pub mod steganography;

pub use capacity::{can_embed, capacity};
pub use codec::{
    decode_expecting, decode_payload, encode_hash, encode_message, encode_payload,
    has_hidden_content,
};
pub use config::CodecPolicy;
pub use error::{Result, StegoError};
pub use integrity::{
    DecodeMode, IntegritySession, SessionState, Verification, compute_file_hash, hash_file,
    hash_reader, verify,
};
pub use payload::{Payload, PayloadKind};
pub use steganography::Carrier;
