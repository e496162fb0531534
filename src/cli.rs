//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::container::ContainerFormat;
use clap::{Args, Parser};
use std::path::PathBuf;

/// 将任意文件转换为无损格式图像 (如 PNG, BMP)，并可从图像还原原始文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "将任意文件转换为无损格式图像 (如 PNG, BMP)，并可从图像还原原始文件。\n\
                  省略 INPUT 与 OUTPUT (或使用 '-') 时读取标准输入并写入标准输出。"
)]
pub struct Cli {
    /// 将图像解码还原为原始文件。
    #[arg(short, long)]
    pub decode: bool,

    #[command(flatten)]
    pub args: TransferArgs,
}

/// 编码与解码共用的参数。
#[derive(Args, Debug)]
pub struct TransferArgs {
    /// 输入文件路径，'-' 表示标准输入。
    #[arg(requires = "output")]
    pub input: Option<PathBuf>,

    /// 输出文件路径，'-' 表示标准输出。
    pub output: Option<PathBuf>,

    /// 图像格式。编码时默认根据输出扩展名推断 (未知时为 PNG)，解码时默认自动识别。
    #[arg(short, long, value_enum)]
    pub format: Option<ContainerFormat>,

    /// 允许覆盖已存在的输出文件。
    #[arg(long)]
    pub force: bool,

    /// 不输出状态信息。
    #[arg(short, long)]
    pub quiet: bool,
}
