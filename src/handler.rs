//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::carrier::{ensure_lossless, to_carrier};
use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::error::StegoError;
use crate::steganography::{capacity, check_capacity, decode, encode};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageReader, RgbaImage};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// 读取并解码载体图像，统一转换为 8 位 RGBA 像素网格。
fn load_carrier(path: &Path) -> Result<RgbaImage> {
    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .decode()
        .with_context(|| {
            format!(
                "Unable to decode image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?;

    debug!(
        "decoded {} as {:?} ({}x{})",
        path.display(),
        image.color(),
        image.width(),
        image.height()
    );

    Ok(to_carrier(&image))
}

/// 在 `source` 同目录下生成 `<prefix><文件名主干>.<extension>` 形式的默认输出路径。
fn default_output(source: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    source.with_file_name(format!("{prefix}{stem}.{extension}"))
}

/// 目标已存在且未指定 `--force` 时拒绝写入。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和数据文件、检查隐写空间是否足够、调用隐写核心函数写入数据和结束标记，
/// 最后将结果以无损格式写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像，或无法读取数据文件。
/// * 目标路径不是无损格式，或目标已存在且未指定 `--force`。
/// * 图像没有足够的空间来隐藏数据。
/// * 数据中含有保留的结束标记字节。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .unwrap_or_else(|| default_output(&args.image, "doctored_", "png"));
    let format = ensure_lossless(&dest)?;
    ensure_writable(&dest, args.force)?;

    let carrier = load_carrier(&args.image)?;

    let payload = fs::read(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    let (width, height) = carrier.dimensions();
    let available = capacity(width, height);
    info!(
        "carrier {}x{} holds {} bytes, payload is {} bytes",
        width,
        height,
        available,
        payload.len()
    );

    check_capacity(width, height, payload.len()).with_context(|| {
        format!(
            "Not enough space in the image to hide the text. \nRequired: {}, Available: {}",
            payload.len().to_string().red().bold(),
            available.max(0).to_string().green().bold()
        )
    })?;

    let doctored = encode(&carrier, &payload).with_context(|| {
        format!(
            "Failed to hide the contents of {} in the image.",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    doctored.save_with_format(&dest, format).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    debug!("wrote {} as {:?}", dest.display(), format);

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用恢复核心函数读取数据直到结束标记，
/// 最后将恢复的内容写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像文件。
/// * 目标已存在且未指定 `--force`。
/// * 图像中找不到结束标记。
/// * 无法写入到目标文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = args
        .text
        .unwrap_or_else(|| default_output(&args.image, "recovered_", "txt"));
    ensure_writable(&dest, args.force)?;

    let carrier = load_carrier(&args.image)?;

    let payload = decode(&carrier).with_context(|| {
        format!(
            "Failed to recover hidden data from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    info!("recovered {} bytes", payload.len());

    fs::write(&dest, payload).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑。
///
/// 只读取图像头部的尺寸信息，不解码像素。
///
/// # Errors
///
/// 无法读取图像头部，或图像过小无法隐藏任何数据时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<i64> {
    let (width, height) = ImageReader::open(&args.image)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(anyhow::Error::from)
        .and_then(|reader| reader.into_dimensions().map_err(anyhow::Error::from))
        .with_context(|| {
            format!(
                "Unable to read image dimensions: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?;

    let available = capacity(width, height);
    debug!("{}x{} -> {} bytes", width, height, available);

    anyhow::ensure!(
        available >= 0,
        StegoError::DegenerateImage { width, height }
    );

    println!(
        "{} ({}x{}) can hold {} bytes",
        args.image.to_string_lossy().bold(),
        width,
        height,
        available.to_string().green().bold()
    );

    Ok(available)
}
