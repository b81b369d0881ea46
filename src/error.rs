//! # 隐写编解码错误
//!
//! 编解码核心只返回 [`StegoError`]，不打印任何日志；
//! 如何向用户报告由调用方 (见 `handler` 模块) 决定。

use thiserror::Error;

/// 隐写编码或解码过程中可能出现的错误。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 图像面积为零或过小，连结束标记都放不下。
    #[error("Image of {width}x{height} pixels is too small to carry any data")]
    DegenerateImage { width: u32, height: u32 },

    /// 待隐藏数据超过了图像容量。
    #[error("Not enough space in the image: payload is {payload} bytes, capacity is {capacity} bytes")]
    CapacityExceeded { payload: usize, capacity: usize },

    /// 遍历完所有像素仍未遇到结束标记。
    #[error("No end-of-message marker found after reading {bytes_read} bytes; the image carries no hidden data or was re-encoded lossily")]
    TerminatorNotFound { bytes_read: usize },

    /// 数据中包含保留的结束标记字节，解码时会被提前截断。
    #[error("Payload byte at offset {offset} equals the reserved end-of-message marker 0x04")]
    ReservedByte { offset: usize },

    /// 像素在整条消息写完之前就用尽了。
    #[error("Carrier ran out of pixels with {unwritten_bits} message bits left to embed")]
    CarrierExhausted { unwritten_bits: usize },
}
