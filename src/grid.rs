//! # 像素网格模块
//!
//! [`PixelGrid`] 是编码器与解码器之间交换的数据结构：
//! 一个按行优先顺序存储的 `width × height` 单元格数组，每个单元格包含 R、G、B 三个通道。

use crate::error::{Error, Result};

/// 单个像素的三个颜色通道 (R, G, B)。
pub type Cell = [u8; 3];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl PixelGrid {
    /// 创建一个所有通道均为 0 的网格。
    ///
    /// # Errors
    ///
    /// 如果单元格总数无法用 `usize` 表示，返回 [`Error::GridTooLarge`]。
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let cells = u64::from(width) * u64::from(height);
        let len = usize::try_from(cells).map_err(|_| Error::GridTooLarge { cells })?;

        Ok(Self {
            width,
            height,
            cells: vec![[0; 3]; len],
        })
    }

    /// 由已有的行优先单元格构造网格，长度必须等于 `width * height`。
    pub fn from_cells(width: u32, height: u32, cells: Vec<Cell>) -> Option<Self> {
        let expected = u64::from(width) * u64::from(height);
        (cells.len() as u64 == expected).then_some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// 将行优先索引转换为 `(x, y)` 坐标，索引超出网格时返回 `None`。
    pub fn position(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.cells.len() {
            return None;
        }
        let width = self.width as usize;
        Some(((index % width) as u32, (index / width) as u32))
    }

    /// 读取 `(x, y)` 处的单元格，越界时返回 `None`。
    pub fn get(&self, x: u32, y: u32) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}
