//! # 图像容器模块
//!
//! 使用 `image` 库在 [`PixelGrid`] 与无损图像文件字节之间转换。
//! 只允许能逐位保存通道值的格式，有损格式会破坏往返编码。

use crate::constants::OPAQUE_ALPHA;
use crate::error::{Error, Result};
use crate::grid::{Cell, PixelGrid};
use clap::ValueEnum;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// 可承载文件数据的无损图像格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ContainerFormat {
    #[default]
    Png,
    Bmp,
    Tiff,
    Qoi,
    /// 仅使用无损 WebP 编码。
    Webp,
}

impl ContainerFormat {
    /// 根据文件扩展名推断格式。
    ///
    /// 无法识别的扩展名返回 `Ok(None)`，由调用方决定默认格式。
    ///
    /// # Errors
    ///
    /// 扩展名对应一种有损 (如 JPEG) 或不支持的格式时，返回 [`Error::UnsupportedFormat`]。
    pub fn from_path(path: &Path) -> Result<Option<Self>> {
        match ImageFormat::from_path(path) {
            Ok(format) => Self::try_from(format).map(Some),
            Err(_) => Ok(None),
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            ContainerFormat::Png => ImageFormat::Png,
            ContainerFormat::Bmp => ImageFormat::Bmp,
            ContainerFormat::Tiff => ImageFormat::Tiff,
            ContainerFormat::Qoi => ImageFormat::Qoi,
            ContainerFormat::Webp => ImageFormat::WebP,
        }
    }
}

impl TryFrom<ImageFormat> for ContainerFormat {
    type Error = Error;

    fn try_from(format: ImageFormat) -> Result<Self> {
        match format {
            ImageFormat::Png => Ok(ContainerFormat::Png),
            ImageFormat::Bmp => Ok(ContainerFormat::Bmp),
            ImageFormat::Tiff => Ok(ContainerFormat::Tiff),
            ImageFormat::Qoi => Ok(ContainerFormat::Qoi),
            ImageFormat::WebP => Ok(ContainerFormat::Webp),
            other => Err(Error::UnsupportedFormat(format!("{other:?}"))),
        }
    }
}

/// 将像素网格序列化为图像容器字节，alpha 通道固定为不透明。
///
/// # Errors
///
/// 图像编码失败时返回 [`Error::Encode`]。
pub fn write_container(grid: &PixelGrid, format: ContainerFormat) -> Result<Vec<u8>> {
    let image = RgbaImage::from_fn(grid.width(), grid.height(), |x, y| {
        let [r, g, b] = grid.get(x, y).unwrap_or_default();
        Rgba([r, g, b, OPAQUE_ALPHA])
    });

    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, format.image_format())
        .map_err(Error::Encode)?;

    Ok(buffer.into_inner())
}

/// 解析图像容器字节并提取像素网格。
///
/// 未指定 `format` 时根据文件头猜测格式。alpha 通道被忽略，
/// 16 位通道 (包括灰度) 只保留低 8 位，灰度值复制到 R、G、B。
///
/// # Errors
///
/// 输入无法被解析为图像时返回 [`Error::Decode`]。
pub fn read_grid(bytes: &[u8], format: Option<ContainerFormat>) -> Result<PixelGrid> {
    let image = match format {
        Some(format) => image::load_from_memory_with_format(bytes, format.image_format()),
        None => image::load_from_memory(bytes),
    }
    .map_err(Error::Decode)?;

    let (width, height) = (image.width(), image.height());
    let cells: Vec<Cell> = match image {
        DynamicImage::ImageRgb16(buffer) => buffer
            .pixels()
            .map(|p| [p[0] as u8, p[1] as u8, p[2] as u8])
            .collect(),
        DynamicImage::ImageRgba16(buffer) => buffer
            .pixels()
            .map(|p| [p[0] as u8, p[1] as u8, p[2] as u8])
            .collect(),
        DynamicImage::ImageLuma16(buffer) => buffer
            .pixels()
            .map(|p| [p[0] as u8; 3])
            .collect(),
        DynamicImage::ImageLumaA16(buffer) => buffer
            .pixels()
            .map(|p| [p[0] as u8; 3])
            .collect(),
        other => other.to_rgb8().pixels().map(|p| p.0).collect(),
    };

    PixelGrid::from_cells(width, height, cells).ok_or_else(|| {
        Error::Decode(image::ImageError::Parameter(
            image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            ),
        ))
    })
}
