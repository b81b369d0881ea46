//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，在图像的 RGB 通道中隐藏任意字节数据，并以结束标记字节收尾。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具。每个像素的 R、G、B 通道各隐藏 1 bit，数据之后追加结束标记字节 0x04。结果只会保存为无损格式 (如 PNG, BMP)。"
)]
pub struct Cli {
    /// 输出更多日志，可重复使用 (-v, -vv)。
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在图像中隐藏文件内容，结果保存为无损格式。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的数据。
    Recover(RecoverArgs),

    /// 查看图像最多能隐藏多少字节。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的载体图像路径 (PNG, BMP, TIFF, WebP, QOI 或 JPEG)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的数据文件路径。
    #[arg(short, long)]
    pub text: PathBuf,

    /// 结果图像的保存路径，默认为载体同目录下的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 目标文件已存在时直接覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复数据的保存路径，默认为图像同目录下的 `recovered_<名称>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 目标文件已存在时直接覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要查看容量的图像路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
