//! # lsb_eot 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：容量计算、按位编解码，
//! 以及围绕它们的载体图像处理和命令行处理。

// 声明库包含的所有模块。

pub mod carrier;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod steganography;

pub use error::StegoError;
pub use steganography::{capacity, check_capacity, decode, encode};
