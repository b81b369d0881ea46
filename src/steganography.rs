//! # LSB 隐写核心
//!
//! 每个像素的 R、G、B 通道各藏 1 bit，Alpha 不参与。
//! 消息按字节依次写入，字节内部低位在前 (bit 0 先写)，
//! 像素按行优先顺序遍历 (从上到下，行内从左到右)。
//! 数据之后追加一个 [`TERMINATOR`] 字节作为结束标记。

use crate::constants::{CHANNELS_PER_PIXEL, OPAQUE, TERMINATOR};
use crate::error::StegoError;
use image::{Rgba, RgbaImage};
use std::iter;

/// 计算 `width x height` 图像最多能隐藏的字节数。
///
/// 可用位数为 `width * height * 3`，向下取整到字节后再减去结束标记占用的 1 字节。
/// 面积为零或小于 3 个像素的图像会得到负数或零，调用方必须拒绝。
pub fn capacity(width: u32, height: u32) -> i64 {
    // u32::MAX² * 3 超出 u64，但除以 8 后仍落在 i64 范围内
    let bits = u128::from(width) * u128::from(height) * u128::from(CHANNELS_PER_PIXEL);
    (bits / 8) as i64 - 1
}

/// 检查 `payload_len` 字节的数据能否放入 `width x height` 的图像，成功时返回容量。
///
/// # Errors
///
/// * [`StegoError::DegenerateImage`] - 容量为负。
/// * [`StegoError::CapacityExceeded`] - 数据长度超过容量。
pub fn check_capacity(width: u32, height: u32, payload_len: usize) -> Result<usize, StegoError> {
    let available = capacity(width, height);
    if available < 0 {
        return Err(StegoError::DegenerateImage { width, height });
    }

    // 32 位平台上容量可能超出 usize，此时任何 payload 都放得下
    let available = usize::try_from(available).unwrap_or(usize::MAX);
    if payload_len > available {
        return Err(StegoError::CapacityExceeded {
            payload: payload_len,
            capacity: available,
        });
    }

    Ok(available)
}

/// 将 `payload` 加上结束标记后展开成逐位序列，每个元素为 0 或 1。
pub fn message_bits(payload: &[u8]) -> impl Iterator<Item = u8> + '_ {
    payload
        .iter()
        .copied()
        .chain(iter::once(TERMINATOR))
        .flat_map(|byte| (0..8).map(move |shift| (byte >> shift) & 1))
}

/// 解码时的累加器：按低位在前的顺序收集比特，凑满 8 位后吐出一个字节。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BitAccumulator {
    byte: u8,
    filled: u8,
}

impl BitAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 放入一个比特 (只取最低位)。满 8 位时返回完整字节并清零。
    pub fn push(&mut self, bit: u8) -> Option<u8> {
        self.byte |= (bit & 1) << self.filled;
        self.filled += 1;

        if self.filled < 8 {
            return None;
        }

        let byte = self.byte;
        *self = Self::default();
        Some(byte)
    }

    /// 当前字节中已放入的位数 (0..=7)。
    pub fn filled(&self) -> u8 {
        self.filled
    }
}

/// 将 `payload` 隐藏进 `carrier`，返回一张新的图像，输入图像保持不变。
///
/// 写完结束标记后剩余的通道原样复制；所有像素的 Alpha 一律写为 255。
///
/// # Errors
///
/// 在修改任何像素之前完成以下检查：
/// * [`StegoError::DegenerateImage`] / [`StegoError::CapacityExceeded`] - 容量不足。
/// * [`StegoError::ReservedByte`] - 数据中含有结束标记字节。
pub fn encode(carrier: &RgbaImage, payload: &[u8]) -> Result<RgbaImage, StegoError> {
    let (width, height) = carrier.dimensions();
    check_capacity(width, height, payload.len())?;

    if let Some(offset) = payload.iter().position(|&byte| byte == TERMINATOR) {
        return Err(StegoError::ReservedByte { offset });
    }

    let mut bits = message_bits(payload);
    let mut doctored = RgbaImage::new(width, height);

    for (source, target) in carrier.pixels().zip(doctored.pixels_mut()) {
        let Rgba([red, green, blue, _]) = *source;
        let mut channels = [red, green, blue];

        for channel in channels.iter_mut() {
            match bits.next() {
                Some(bit) => *channel = (*channel & 0xFE) | bit,
                None => break,
            }
        }

        *target = Rgba([channels[0], channels[1], channels[2], OPAQUE]);
    }

    let unwritten_bits = bits.count();
    if unwritten_bits > 0 {
        return Err(StegoError::CarrierExhausted { unwritten_bits });
    }

    Ok(doctored)
}

/// 从 `carrier` 中恢复隐藏的数据 (不含结束标记)。
///
/// # Errors
///
/// 遍历完所有像素仍未遇到结束标记时返回 [`StegoError::TerminatorNotFound`]。
pub fn decode(carrier: &RgbaImage) -> Result<Vec<u8>, StegoError> {
    let mut accumulator = BitAccumulator::new();
    let mut payload = Vec::new();

    let lsbs = carrier
        .pixels()
        .flat_map(|&Rgba([red, green, blue, _])| [red & 1, green & 1, blue & 1]);

    for bit in lsbs {
        match accumulator.push(bit) {
            Some(TERMINATOR) => return Ok(payload),
            Some(byte) => payload.push(byte),
            None => {}
        }
    }

    Err(StegoError::TerminatorNotFound {
        bytes_read: payload.len(),
    })
}
