use image::ImageFormat;

/// 消息结束标记 (ASCII EOT)。
/// 解码时每凑满一个字节就与它比较，相等即表示消息结束，它本身不会出现在恢复的数据中。
pub const TERMINATOR: u8 = 0b0000_0100;

/// 每个像素承载数据的通道数 (R, G, B)。Alpha 通道从不携带数据。
pub const CHANNELS_PER_PIXEL: u64 = 3;

/// 16 位通道 (0..=65535) 与 8 位通道 (0..=255) 之间的精确比例：65535 / 255 = 257。
pub const CHANNEL_SCALE: u16 = 257;

/// 输出像素统一写入的 Alpha 值。
pub const OPAQUE: u8 = 255;

/// 可以安全写出载体图像的无损格式。
pub const LOSSLESS_OUTPUT: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Qoi,
];
