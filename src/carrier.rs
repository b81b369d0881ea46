//! # 载体图像处理
//!
//! 负责把解码后的图像统一转换成 8 位 RGBA 像素网格，
//! 并保证隐写结果只会写入无损格式。

use crate::constants::{CHANNEL_SCALE, LOSSLESS_OUTPUT};
use anyhow::{Result, anyhow};
use colored::Colorize;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::path::Path;

/// 将 16 位通道值精确映射到 0..=255。
pub fn normalize_channel(value: u16) -> u8 {
    (value / CHANNEL_SCALE) as u8
}

/// 将任意位深的图像转换为 8 位 RGBA 像素网格。
///
/// 8 位图像逐通道复制；16 位和浮点图像先取 16 位 RGBA，再用 [`normalize_channel`] 缩放。
pub fn to_carrier(image: &DynamicImage) -> RgbaImage {
    match image {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_) => image.to_rgba8(),
        _ => {
            let wide = image.to_rgba16();
            let mut carrier = RgbaImage::new(wide.width(), wide.height());
            for (source, target) in wide.pixels().zip(carrier.pixels_mut()) {
                *target = Rgba(source.0.map(normalize_channel));
            }
            carrier
        }
    }
}

/// 根据扩展名确认输出路径是受支持的无损格式。
///
/// # Errors
///
/// 扩展名无法识别，或对应有损格式 (如 JPEG) 时返回错误。
pub fn ensure_lossless(path: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        anyhow!(
            "Cannot determine an image format from output path: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        LOSSLESS_OUTPUT.contains(&format),
        "Output format {} is not lossless and would destroy the hidden data. \nUse one of: png, bmp, tiff, webp, qoi",
        format!("{format:?}").red().bold()
    );

    Ok(format)
}
