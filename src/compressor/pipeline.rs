//! # 解码与尺寸适配模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → 预算内像素面”的过程集中管理。尺寸适配只缩不放：
//! 已经落在预算内的图片保持原始尺寸，超出预算时按统一比例等比缩小。
//!
//! ## 实现思路
//!
//! 1. 完整解码来源字节
//! 2. 计算统一缩放比例（上限 1，不放大）
//! 3. 目标尺寸向下取整，保证绝不越过预算边界
//! 4. 优先走 fast_image_resize，失败时回退 `image::resize_exact`

use fast_image_resize as fr;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageReader, Rgba};
use std::io::Cursor;

use super::{CompressError, CompressionOptions};

/// 将原始字节解码为像素图。
pub(crate) fn decode_image(bytes: &[u8]) -> Result<DynamicImage, CompressError> {
    image::load_from_memory(bytes)
        .map_err(|e| CompressError::Decode(format!("图片解码失败：{}", e)))
}

/// 仅通过图片头信息读取宽高。
///
/// 用于报告阶段回读结果尺寸，无需完整解码。
pub(crate) fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32), CompressError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CompressError::Decode(format!("无法识别图片格式：{}", e)))?;

    reader
        .into_dimensions()
        .map_err(|e| CompressError::Decode(format!("无法读取图片尺寸：{}", e)))
}

/// 计算预算内的目标尺寸。
///
/// 比例取 `min(max_width/w, max_height/h)` 且不超过 1（不放大），
/// 目标宽高向下取整并保底 1 像素，保证绝不因四舍五入越界。
pub(crate) fn fit_within(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);

    let target_width = ((width as f64 * scale).floor() as u32).max(1);
    let target_height = ((height as f64 * scale).floor() as u32).max(1);

    (target_width, target_height)
}

/// 按预算执行等比降采样。
///
/// 落在预算内的图片原样返回，不做任何重采样。
pub(crate) fn scale_to_fit(
    image: DynamicImage,
    options: &CompressionOptions,
) -> Result<DynamicImage, CompressError> {
    let (width, height) = image.dimensions();
    let (target_width, target_height) =
        fit_within(width, height, options.max_width, options.max_height);

    if (target_width, target_height) == (width, height) {
        return Ok(image);
    }

    log::info!(
        "🧩 等比降采样：{}x{} -> {}x{}（filter={:?}）",
        width,
        height,
        target_width,
        target_height,
        options.resize_filter
    );

    match resize_with_fast_image_resize(&image, target_width, target_height, options.resize_filter)
    {
        Ok(resized) => Ok(resized),
        Err(err) => {
            log::warn!(
                "⚠️ fast_image_resize 降采样失败，回退 image::resize_exact：{}",
                err
            );
            Ok(image.resize_exact(target_width, target_height, options.resize_filter))
        }
    }
}

fn resize_with_fast_image_resize(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
    filter: image::imageops::FilterType,
) -> Result<DynamicImage, CompressError> {
    let src = image.to_rgba8();
    let (src_width, src_height) = src.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        src.into_raw(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| CompressError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(
        to_fast_filter(filter),
    ));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| CompressError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
        target_width,
        target_height,
        dst_image.into_vec(),
    )
    .ok_or_else(|| CompressError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))?;

    Ok(DynamicImage::ImageRgba8(rgba))
}

fn to_fast_filter(filter: image::imageops::FilterType) -> fr::FilterType {
    match filter {
        image::imageops::FilterType::Nearest => fr::FilterType::Box,
        image::imageops::FilterType::Triangle => fr::FilterType::Bilinear,
        image::imageops::FilterType::CatmullRom => fr::FilterType::CatmullRom,
        image::imageops::FilterType::Gaussian => fr::FilterType::Mitchell,
        image::imageops::FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use proptest::prelude::*;

    #[test]
    fn fit_keeps_dimensions_when_already_within_budget() {
        assert_eq!(fit_within(300, 200, 1920, 1080), (300, 200));
        assert_eq!(fit_within(1920, 1080, 1920, 1080), (1920, 1080));
    }

    #[test]
    fn fit_scales_down_by_the_tighter_axis() {
        // 宽度是更紧的约束：2000 -> 800，高度随比例 0.4 变为 400。
        assert_eq!(fit_within(2000, 1000, 800, 600), (800, 400));
        // 高度是更紧的约束。
        assert_eq!(fit_within(1000, 2000, 600, 800), (400, 800));
    }

    #[test]
    fn fit_floors_fractional_dimensions() {
        // 比例 600/1001，宽 997 * 0.5994... = 597.6 -> 597。
        let (w, h) = fit_within(997, 1001, 1920, 600);
        assert_eq!(h, 600);
        assert_eq!(w, 597);
    }

    #[test]
    fn fit_never_collapses_to_zero() {
        let (w, h) = fit_within(10_000, 3, 100, 100);
        assert!(w >= 1 && h >= 1);
        assert!(w <= 100 && h <= 100);
    }

    #[test]
    fn scale_to_fit_returns_original_surface_untouched() {
        let image = DynamicImage::new_rgba8(320, 240);
        let options = CompressionOptions::default();

        let scaled = scale_to_fit(image, &options).expect("scale should succeed");
        assert_eq!(scaled.dimensions(), (320, 240));
    }

    #[test]
    fn scale_to_fit_downscales_oversized_surface() {
        let image = DynamicImage::new_rgba8(3840, 2160);
        let options = CompressionOptions::default();

        let scaled = scale_to_fit(image, &options).expect("scale should succeed");
        assert_eq!(scaled.dimensions(), (1920, 1080));
    }

    #[test]
    fn read_dimensions_matches_encoded_header() {
        let image = DynamicImage::new_rgba8(64, 48);
        let mut cursor = Cursor::new(Vec::new());
        image
            .write_to(&mut cursor, ImageFormat::Png)
            .expect("failed to encode test image");

        let dims = read_dimensions(cursor.get_ref()).expect("dimensions should be readable");
        assert_eq!(dims, (64, 48));
    }

    #[test]
    fn read_dimensions_rejects_garbage() {
        let result = read_dimensions(b"definitely not an image");
        assert!(matches!(result, Err(CompressError::Decode(_))));
    }

    proptest! {
        // 任意来源尺寸与预算组合：输出不越界、不放大、比例在一个像素的取整误差内。
        #[test]
        fn fit_within_respects_budget_and_aspect(
            width in 1u32..6000,
            height in 1u32..6000,
            max_width in 1u32..4000,
            max_height in 1u32..4000,
        ) {
            let (w, h) = fit_within(width, height, max_width, max_height);

            prop_assert!(w >= 1 && h >= 1);
            prop_assert!(w <= width.max(1) && h <= height.max(1));
            if width > max_width || height > max_height {
                prop_assert!(w <= max_width && h <= max_height);
            } else {
                prop_assert_eq!((w, h), (width, height));
            }

            // 交叉相乘后的比例误差不超过一个像素的取整范围。
            let cross = (w as i64) * (height as i64) - (width as i64) * (h as i64);
            prop_assert!(cross.abs() <= (width as i64) + (height as i64));
        }
    }
}
