//! # 编解码核心模块
//!
//! 字节流与像素网格之间的可逆变换。
//!
//! 网格布局 (行优先)：
//! * 单元格 `0..HEADER_CELLS`：原始长度，`u64` 小端序，最后一个空余通道为 0。
//! * 单元格 `HEADER_CELLS..`：文件内容，每个单元格 3 字节，最后一个单元格不足部分补 0。
//! * 其余单元格：全为 0，解码时从不读取。

use crate::constants::{CHANNELS_PER_CELL, HEADER_BYTES, HEADER_CELLS};
use crate::error::{Error, Result};
use crate::grid::{Cell, PixelGrid};
use std::io::{self, ErrorKind};

/// 承载 `file_size` 字节所需的单元格总数 (头部 + 有效载荷)。
pub fn pixel_count(file_size: u64) -> u64 {
    HEADER_CELLS as u64 + file_size.div_ceil(CHANNELS_PER_CELL as u64)
}

/// 正方形网格的边长：`ceil(sqrt(pixel_count))`。
///
/// 空输入同样需要 3 个头部单元格，因此边长至少为 2。
pub fn grid_dimension(file_size: u64) -> u64 {
    let cells = pixel_count(file_size);
    let root = cells.isqrt();
    if root * root < cells { root + 1 } else { root }
}

/// 将字节流编码为正方形像素网格。
///
/// # Errors
///
/// 网格边长超出 `u32` 或单元格总数无法分配时，返回 [`Error::GridTooLarge`]。
pub fn encode(data: &[u8]) -> Result<PixelGrid> {
    let file_size = data.len() as u64;
    let dimension = u32::try_from(grid_dimension(file_size)).map_err(|_| Error::GridTooLarge {
        cells: pixel_count(file_size),
    })?;

    let mut grid = PixelGrid::new(dimension, dimension)?;
    let (header, payload) = grid.cells_mut().split_at_mut(HEADER_CELLS);

    pack(header, &file_size.to_le_bytes());
    pack(payload, data);

    Ok(grid)
}

/// 从像素网格中还原原始字节流。
///
/// 网格不要求是正方形，只要求单元格按行优先顺序寻址。
///
/// # Errors
///
/// * 单元格数量少于头部声明所需时，返回 [`Error::Truncated`]。
/// * 声明的长度无法在内存中分配时，返回 [`Error::Read`]。
pub fn decode(grid: &PixelGrid) -> Result<Vec<u8>> {
    let cells = grid.cells();
    let available = cells.len() as u64;

    if cells.len() < HEADER_CELLS {
        return Err(Error::Truncated {
            required: HEADER_CELLS as u64,
            available,
        });
    }

    let mut header = [0u8; HEADER_BYTES];
    header
        .iter_mut()
        .zip(cells[..HEADER_CELLS].iter().flatten())
        .for_each(|(byte, &channel)| *byte = channel);
    let file_size = u64::from_le_bytes(header);

    let required = pixel_count(file_size);
    if available < required {
        return Err(Error::Truncated {
            required,
            available,
        });
    }

    let len = usize::try_from(file_size).map_err(|_| out_of_memory(file_size))?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| out_of_memory(file_size))?;

    data.extend(cells[HEADER_CELLS..].iter().flatten().take(len));

    Ok(data)
}

/// 按 R、G、B 顺序把字节依次写入单元格，多余的通道保持为 0。
fn pack(cells: &mut [Cell], bytes: &[u8]) {
    cells
        .iter_mut()
        .zip(bytes.chunks(CHANNELS_PER_CELL))
        .for_each(|(cell, chunk)| cell[..chunk.len()].copy_from_slice(chunk));
}

fn out_of_memory(file_size: u64) -> Error {
    Error::Read(io::Error::new(
        ErrorKind::OutOfMemory,
        format!("declared length of {file_size} bytes does not fit in memory"),
    ))
}
