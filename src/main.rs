use clap::Parser;
use simple_logger::SimpleLogger;
use std::process::ExitCode;

use lsb_seal::{
    cli::{Cli, Commands},
    handler::{handle_capacity, handle_hide, handle_recover, handle_seal, handle_verify},
};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并根据指定的子命令
/// 将执行分派到相应的处理函数。校验不匹配时以失败状态退出
fn main() -> anyhow::Result<ExitCode> {
    // 解析命令行参数
    let cli = Cli::parse();

    SimpleLogger::new().with_level(cli.log_level()).init()?;

    let policy = cli.policy();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Hide(args) => handle_hide(args, &policy)?,
        Commands::Seal(args) => handle_seal(args, &policy)?,
        Commands::Recover(args) => handle_recover(args, &policy)?,
        Commands::Verify(args) => {
            if !handle_verify(args, &policy)?.is_match() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Capacity(args) => {
            handle_capacity(args)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
