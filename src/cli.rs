//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::config::CodecPolicy;
use crate::constants::DEFAULT_MAX_PAYLOAD_BYTES;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，可在无损图像中隐藏文本，或隐藏文件的 SHA-256 哈希用于之后的完整性校验。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，可在无损图像 (如 PNG, BMP) 中隐藏文本，或隐藏文件的 SHA-256 哈希用于之后的完整性校验。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 允许嵌入或提取的最大载荷字节数。
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_PAYLOAD_BYTES)]
    pub max_payload: usize,

    /// 提高日志详细程度 (-v, -vv, -vvv)。
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn policy(&self) -> CodecPolicy {
        CodecPolicy::default().with_max_payload_bytes(self.max_payload)
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// 可用的子命令。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像中隐藏一条文本消息。
    Hide(HideArgs),

    /// 计算目标文件的 SHA-256 哈希并将其隐藏到图像中。
    Seal(SealArgs),

    /// 从经过隐写的图像中恢复隐藏的消息或哈希。
    Recover(RecoverArgs),

    /// 从图像中提取哈希，并用它校验候选文件。
    Verify(VerifyArgs),

    /// 显示图像最多可以隐藏多少字节。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 直接在命令行上给出的消息。
    #[arg(short, long, conflicts_with = "text", required_unless_present = "text")]
    pub message: Option<String>,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 结果图像的输出路径 (PNG)。缺省为输入图像旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'seal' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct SealArgs {
    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 需要保护完整性的目标文件。
    #[arg(short, long)]
    pub target: PathBuf,

    /// 结果图像的输出路径 (PNG)。缺省为输入图像旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复内容的保存路径。缺省为图像旁的 `recovered_<名称>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'verify' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// 隐藏了哈希的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 待校验的候选文件。
    #[arg(short, long)]
    pub candidate: PathBuf,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要查询的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
