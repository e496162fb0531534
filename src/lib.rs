//! # file2png 库
//!
//! 本库包含 file2png 的核心逻辑：把任意字节流编码为无损图像的像素网格，
//! 以及从像素网格中还原原始字节。

// 声明库包含的所有模块。

pub mod cli;
pub mod codec;
pub mod constants;
pub mod container;
pub mod error;
pub mod grid;
pub mod handler;
