//! # 命令处理逻辑模块
//!
//! 包含处理各个子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、图像解码与编码、调用核心隐写算法以及向用户报告结果。

use crate::capacity::capacity;
use crate::cli::{CapacityArgs, HideArgs, RecoverArgs, SealArgs, VerifyArgs};
use crate::codec::{decode_payload, encode_payload};
use crate::config::CodecPolicy;
use crate::constants::{DOCTORED_PREFIX, RECOVERED_PREFIX};
use crate::integrity::{DecodeMode, IntegritySession, Verification, hash_file};
use crate::payload::{Payload, PayloadKind};
use crate::steganography::Carrier;
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, RgbaImage};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 读取并解码图像文件，转换为 RGBA 载体。
fn load_carrier(path: &Path) -> Result<Carrier> {
    let image = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    info!(
        "Loaded {}x{} carrier from {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(Carrier::from(image.to_rgba8()))
}

/// 在 `path` 旁边生成 `<prefix><文件名>.<extension>` 形式的默认输出路径。
fn default_output(path: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_owned());

    path.with_file_name(format!("{prefix}{stem}.{extension}"))
}

/// 除非指定了 `--force`，否则拒绝覆盖已存在的文件。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 将载荷嵌入图像并以 PNG 格式保存，返回实际的输出路径。
fn embed_and_save(
    image: &Path,
    dest: Option<PathBuf>,
    force: bool,
    payload: &Payload,
    policy: &CodecPolicy,
) -> Result<PathBuf> {
    let dest = dest.unwrap_or_else(|| default_output(image, DOCTORED_PREFIX, "png"));
    ensure_writable(&dest, force)?;

    let carrier = load_carrier(image)?;
    let (width, height) = (carrier.width(), carrier.height());

    let doctored = encode_payload(&carrier, payload, policy).with_context(|| {
        format!(
            "Failed to hide the {} in the image. \nCapacity of this {}x{} image: {} bytes",
            payload.kind(),
            width,
            height,
            capacity(width, height).to_string().green().bold()
        )
    })?;

    RgbaImage::try_from(doctored)?
        .save_with_format(&dest, ImageFormat::Png)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                dest.to_string_lossy().red().bold()
            )
        })?;

    Ok(dest)
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 消息来自 `--message` 或 `--text` 指定的文件，嵌入后以 PNG 格式写入目标路径。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件，或文本不是 UTF-8。
/// * 目标文件已存在且没有指定 `--force`。
/// * 图像没有足够的空间来隐藏文本。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs, policy: &CodecPolicy) -> Result<()> {
    let message = match (args.message, &args.text) {
        (Some(message), _) => message,
        (None, Some(text)) => fs::read_to_string(text).with_context(|| {
            format!(
                "Unable to read text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("Either --message or --text must be given."),
    };

    let dest = embed_and_save(
        &args.image,
        args.dest,
        args.force,
        &Payload::Message(message),
        policy,
    )?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Seal' 命令的执行逻辑。
///
/// 计算目标文件的 SHA-256 哈希，以 `HASH:` 标记嵌入图像。
///
/// # Errors
///
/// 目标文件无法读取、图像无法读取或容量不足、目标图像无法写入时返回错误。
pub fn handle_seal(args: SealArgs, policy: &CodecPolicy) -> Result<()> {
    let digest = hash_file(&args.target).with_context(|| {
        format!(
            "Unable to hash target file: {}",
            args.target.to_string_lossy().red().bold()
        )
    })?;

    let dest = embed_and_save(
        &args.image,
        args.dest,
        args.force,
        &Payload::Hash(digest.clone()),
        policy,
    )?;

    println!(
        "The file hash {} has been successfully hidden and saved: {}",
        digest.cyan(),
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 提取并分类隐藏的载荷，打印其种类，并将内容写入目标文本文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中没有有效的隐藏数据，或数据已损坏。
/// * 目标文件已存在且没有指定 `--force`，或无法写入。
pub fn handle_recover(args: RecoverArgs, policy: &CodecPolicy) -> Result<()> {
    let dest = args
        .text
        .unwrap_or_else(|| default_output(&args.image, RECOVERED_PREFIX, "txt"));
    ensure_writable(&dest, args.force)?;

    let carrier = load_carrier(&args.image)?;
    let payload = decode_payload(&carrier, policy).with_context(|| {
        format!(
            "Failed to recover hidden data from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    match payload.kind() {
        PayloadKind::Message => println!("{}", "Recovered a hidden message.".bold()),
        PayloadKind::Hash => println!(
            "{} {}",
            "Recovered a file hash (SHA-256):".bold(),
            payload.content().cyan()
        ),
    }

    fs::write(&dest, payload.content()).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The content has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Verify' 命令的执行逻辑。
///
/// 在完整性模式下从图像提取哈希，再用它校验候选文件。
/// 不匹配是正常的校验结论，以 `Ok(Verification::Mismatch)` 返回，由调用方决定退出状态。
///
/// # Errors
///
/// 图像中没有哈希或候选文件无法读取时返回错误。
pub fn handle_verify(args: VerifyArgs, policy: &CodecPolicy) -> Result<Verification> {
    let carrier = load_carrier(&args.image)?;

    let mut session = IntegritySession::new(DecodeMode::Integrity, *policy);
    let extracted = session
        .extract(&carrier)
        .with_context(|| {
            format!(
                "This image does not contain a hidden hash: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?
        .map(str::to_owned)
        .context("This image does not contain a hidden hash.")?;

    let candidate = fs::read(&args.candidate).with_context(|| {
        format!(
            "Unable to read candidate file: {}",
            args.candidate.to_string_lossy().red().bold()
        )
    })?;

    let verification = session.verify_candidate(&candidate)?;

    println!("{} {}", "Extracted hash:".bold(), extracted.cyan());
    match verification {
        Verification::Match => println!(
            "Integrity verified: {} matches the hidden hash.",
            args.candidate.to_string_lossy().green().bold()
        ),
        Verification::Mismatch => println!(
            "Integrity check failed: {} does not match the hidden hash.",
            args.candidate.to_string_lossy().red().bold()
        ),
    }

    Ok(verification)
}

/// 处理 'Capacity' 命令的执行逻辑。
///
/// # Errors
///
/// 无法读取输入图像时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<usize> {
    let carrier = load_carrier(&args.image)?;
    let bytes = capacity(carrier.width(), carrier.height());

    println!(
        "{}x{} image can hide up to {} bytes.",
        carrier.width(),
        carrier.height(),
        bytes.to_string().green().bold()
    );
    Ok(bytes)
}
