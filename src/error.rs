//! # 错误类型模块
//!
//! 编码、解码与容器读写过程中可能出现的全部错误。
//! 每个错误都可以通过 [`Error::kind`] 归类为一个可区分的 [`ErrorKind`]。

use std::io;
use thiserror::Error;

/// 核心操作返回的错误。
#[derive(Debug, Error)]
pub enum Error {
    /// 输入无法被完整读取，或输出缓冲区无法分配。
    #[error("Failed to read input: {0}")]
    Read(#[source] io::Error),

    /// 图像编解码库拒绝序列化像素网格。
    #[error("Failed to encode image container: {0}")]
    Encode(#[source] image::ImageError),

    /// 像素网格超出图像容器可表示的尺寸。
    #[error("Pixel grid of {cells} cells exceeds the image size limit")]
    GridTooLarge { cells: u64 },

    /// 所选容器格式有损或不受支持，无法逐位保存通道数据。
    #[error("Image format {0} is unsupported or lossy and cannot carry file data")]
    UnsupportedFormat(String),

    /// 输入无法被解析为图像容器。
    #[error("Failed to decode image container: {0}")]
    Decode(#[source] image::ImageError),

    /// 网格的单元格数量不足以提供头部声明的字节数。
    #[error("Image is truncated: {required} cells required, only {available} available")]
    Truncated { required: u64, available: u64 },

    /// 输出目标拒绝写入。
    #[error("Failed to write output: {0}")]
    Write(#[source] io::Error),
}

/// 错误的类别，调用方据此区分失败原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Read,
    Encode,
    Decode,
    TruncatedData,
    Write,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Read(_) => ErrorKind::Read,
            Error::Encode(_) | Error::GridTooLarge { .. } | Error::UnsupportedFormat(_) => {
                ErrorKind::Encode
            }
            Error::Decode(_) => ErrorKind::Decode,
            Error::Truncated { .. } => ErrorKind::TruncatedData,
            Error::Write(_) => ErrorKind::Write,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
