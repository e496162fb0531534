//! # 命令处理逻辑模块
//!
//! 包含编码与解码两种模式的高级业务逻辑。
//! 本模块负责协调文件 / 标准流 I/O、调用核心编解码函数以及向用户报告结果。
//! 状态信息写入标准错误，因为标准输出可能承载二进制数据。

use crate::cli::TransferArgs;
use crate::codec::{decode, encode};
use crate::constants::STDIO_PATH;
use crate::container::{ContainerFormat, read_grid, write_container};
use crate::error::Error;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

/// 处理编码模式的执行逻辑。
///
/// 读取全部输入字节，编码为像素网格，序列化为图像容器后一次性写入输出。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与选项的 `TransferArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出文件已存在且未指定 `--force`。
/// * 输出扩展名对应有损或不支持的图像格式。
/// * 无法读取输入。
/// * 网格过大或图像编码失败。
/// * 无法写入输出。
pub fn handle_encode(args: TransferArgs) -> Result<()> {
    let input = stdio_or_path(args.input.as_deref());
    let output = stdio_or_path(args.output.as_deref());
    ensure_writable(output, args.force)?;

    let format = match (args.format, output) {
        (Some(format), _) => format,
        (None, Some(path)) => ContainerFormat::from_path(path)
            .with_context(|| {
                format!(
                    "Refusing to write an unsupported or lossy image: {}",
                    path.to_string_lossy().red().bold()
                )
            })?
            .unwrap_or_default(),
        (None, None) => ContainerFormat::default(),
    };

    let data = read_input(input)?;

    let grid = encode(&data).with_context(|| {
        format!(
            "Unable to lay out {} bytes as a pixel grid.",
            data.len().to_string().red().bold()
        )
    })?;

    let container = write_container(&grid, format).with_context(|| {
        format!(
            "Failed to encode a {}x{} {:?} image.",
            grid.width(),
            grid.height(),
            format
        )
    })?;

    write_output(output, &container, args.force)?;

    if !args.quiet {
        eprintln!(
            "Encoded {} bytes into a {}x{} image: {}",
            data.len().to_string().green().bold(),
            grid.width(),
            grid.height(),
            describe(output).green().bold()
        );
    }

    Ok(())
}

/// 处理解码模式的执行逻辑。
///
/// 读取图像容器，提取像素网格，按长度头部还原原始字节并写入输出。
/// 只有在所有字节都还原成功后才会写入输出。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与选项的 `TransferArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取输入，或输入不是可识别的图像。
/// * 图像的像素数量不足以提供头部声明的长度。
/// * 无法写入输出。
pub fn handle_decode(args: TransferArgs) -> Result<()> {
    let input = stdio_or_path(args.input.as_deref());
    let output = stdio_or_path(args.output.as_deref());
    ensure_writable(output, args.force)?;

    let container = read_input(input)?;

    let grid = read_grid(&container, args.format).with_context(|| {
        format!(
            "Unable to parse image: {}",
            describe(input).red().bold()
        )
    })?;

    let data = decode(&grid).with_context(|| {
        format!(
            "Failed to recover file data from a {}x{} image. \nThe image may not have been produced by file2png or is corrupted.",
            grid.width().to_string().red().bold(),
            grid.height().to_string().red().bold()
        )
    })?;

    write_output(output, &data, args.force)?;

    if !args.quiet {
        eprintln!(
            "Decoded {} bytes: {}",
            data.len().to_string().green().bold(),
            describe(output).green().bold()
        );
    }

    Ok(())
}

/// 把 `-` 或缺省路径视为标准流，返回 `None`。
fn stdio_or_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != STDIO_PATH)
}

fn describe(path: Option<&Path>) -> String {
    path.map_or_else(|| "<stdio>".to_string(), |p| p.to_string_lossy().into_owned())
}

fn ensure_writable(output: Option<&Path>, force: bool) -> Result<()> {
    if let Some(path) = output {
        anyhow::ensure!(
            force || !path.exists(),
            "Output file already exists: {}. \nUse --force to overwrite it.",
            path.to_string_lossy().red().bold()
        );
    }
    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>> {
    let data = match input {
        Some(path) => fs::read(path),
        None => {
            let mut buffer = Vec::new();
            io::stdin().lock().read_to_end(&mut buffer).map(|_| buffer)
        }
    };

    data.map_err(Error::Read).with_context(|| {
        format!(
            "Unable to read input: {}",
            describe(input).red().bold()
        )
    })
}

/// 未指定 `force` 时以 `create_new` 打开输出文件，文件已存在则写入失败。
fn write_output(output: Option<&Path>, bytes: &[u8], force: bool) -> Result<()> {
    let written = match output {
        Some(path) => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .create_new(!force)
            .open(path)
            .and_then(|mut file| file.write_all(bytes)),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).and_then(|()| stdout.flush())
        }
    };

    written.map_err(Error::Write).with_context(|| {
        format!(
            "Unable to write output: {}",
            describe(output).red().bold()
        )
    })
}
