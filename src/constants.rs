/// 长度头部占用的字节数。
/// 原始文件长度以 `u64` 小端序存储，因此占 8 字节。
pub const HEADER_BYTES: usize = 8;

/// 每个像素 (单元格) 承载的字节数，分别写入 R、G、B 三个通道。
pub const CHANNELS_PER_CELL: usize = 3;

/// 长度头部占用的单元格数量：`ceil(8 / 3) = 3`。
/// 第 3 个单元格的蓝色通道不承载数据，固定为 0。
/// 有效载荷从这个索引开始写入。
pub const HEADER_CELLS: usize = HEADER_BYTES.div_ceil(CHANNELS_PER_CELL);

/// 写入图像容器时使用的 alpha 值，不承载任何数据。
pub const OPAQUE_ALPHA: u8 = u8::MAX;

/// 命令行中代表标准输入 / 标准输出的路径。
pub const STDIO_PATH: &str = "-";
