//! # 质量编码模块
//!
//! ## 设计思路
//!
//! 单次编码保持纯粹：给定像素面、格式与质量，产出编码字节或失败。
//! 预算纠偏的“降质一次重编码”策略属于流程编排，放在 handler 中；
//! 本模块只提供纠偏质量的计算公式，保证该公式可独立测试。
//!
//! ## 实现思路
//!
//! - JPEG 走带质量参数的编码器，质量从 0.1~1.0 映射到 1~100。
//! - PNG 与 WebP（无损）忽略质量参数。
//! - 编码器无输出视为编码失败，与解码失败严格区分。

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::DynamicImage;
use std::io::Cursor;

use super::config::MIN_QUALITY;
use super::{CompressError, OutputFormat};

/// 将像素面按指定格式与质量编码。
pub(crate) fn encode_image(
    image: &DynamicImage,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, CompressError> {
    let mut cursor = Cursor::new(Vec::new());

    match format {
        OutputFormat::Jpeg => {
            // JPEG 不支持透明通道，先压平为 RGB。
            let rgb = image.to_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut cursor, jpeg_quality(quality));
            rgb.write_with_encoder(encoder)
                .map_err(|e| CompressError::Encode(format!("JPEG 编码失败：{}", e)))?;
        }
        OutputFormat::Png => {
            let encoder = PngEncoder::new(&mut cursor);
            image
                .write_with_encoder(encoder)
                .map_err(|e| CompressError::Encode(format!("PNG 编码失败：{}", e)))?;
        }
        OutputFormat::WebP => {
            let encoder = WebPEncoder::new_lossless(&mut cursor);
            image
                .write_with_encoder(encoder)
                .map_err(|e| CompressError::Encode(format!("WebP 编码失败：{}", e)))?;
        }
    }

    let bytes = cursor.into_inner();
    if bytes.is_empty() {
        return Err(CompressError::Encode("编码器未产生任何输出".to_string()));
    }

    Ok(bytes)
}

/// 计算预算超出后的纠偏质量。
///
/// 公式：`max(0.1, quality * budget_bytes / first_pass_bytes)`。
/// 仅在首次编码超出预算（`first_pass_bytes > budget_bytes`）时调用，
/// 因此结果一定低于原质量；无论超出多少，下限都固定在 0.1。
pub fn corrective_quality(quality: f32, budget_bytes: u64, first_pass_bytes: u64) -> f32 {
    if first_pass_bytes == 0 {
        return MIN_QUALITY;
    }

    (quality * (budget_bytes as f32 / first_pass_bytes as f32)).max(MIN_QUALITY)
}

/// 质量参数（0.1~1.0）到 JPEG 编码器档位（1~100）的映射。
fn jpeg_quality(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, Rgba};

    fn noisy_surface(width: u32, height: u32) -> DynamicImage {
        let buffer = ImageBuffer::from_fn(width, height, |x, y| {
            let r = ((x * 31 + y * 17) % 255) as u8;
            let g = ((x * 13 + y * 41) % 255) as u8;
            let b = ((x * 7 + y * 3) % 255) as u8;
            Rgba([r, g, b, 255])
        });
        DynamicImage::ImageRgba8(buffer)
    }

    #[test]
    fn jpeg_quality_maps_fraction_to_encoder_scale() {
        assert_eq!(jpeg_quality(0.1), 10);
        assert_eq!(jpeg_quality(0.8), 80);
        assert_eq!(jpeg_quality(1.0), 100);
        // 防御性夹取：非法输入不会越过编码器区间。
        assert_eq!(jpeg_quality(0.0), 1);
        assert_eq!(jpeg_quality(2.0), 100);
    }

    #[test]
    fn corrective_quality_scales_linearly_with_overshoot() {
        // 超出两倍预算 -> 质量减半。
        let q = corrective_quality(0.8, 100 * 1024, 200 * 1024);
        assert!((q - 0.4).abs() < 1e-6);
    }

    #[test]
    fn corrective_quality_is_floored() {
        let q = corrective_quality(0.8, 1024, 10 * 1024 * 1024);
        assert!((q - 0.1).abs() < f32::EPSILON);

        let q = corrective_quality(0.1, 0, 0);
        assert!((q - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn encodes_all_output_formats() {
        let surface = noisy_surface(64, 48);

        for format in [OutputFormat::Jpeg, OutputFormat::Png, OutputFormat::WebP] {
            let bytes = encode_image(&surface, format, 0.8).expect("encode should succeed");
            assert!(!bytes.is_empty());

            let decoded = image::load_from_memory(&bytes).expect("output should decode back");
            assert_eq!(decoded.width(), 64);
            assert_eq!(decoded.height(), 48);
        }
    }

    #[test]
    fn lower_jpeg_quality_produces_smaller_output() {
        let surface = noisy_surface(256, 256);

        let high = encode_image(&surface, OutputFormat::Jpeg, 0.9).expect("encode should succeed");
        let low = encode_image(&surface, OutputFormat::Jpeg, 0.1).expect("encode should succeed");

        assert!(low.len() < high.len());
    }
}
