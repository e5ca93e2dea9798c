//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `Compressor` 只负责流程编排与预算管理，不关心具体编解码实现。
//! 处理链路固定为：
//! 1. 读取预算快照
//! 2. 非图片来源直接透传
//! 3. 解码并等比降采样到预算内
//! 4. 按质量编码；超出体积预算时降质重编码一次
//! 5. 输出自描述的文本安全结果
//!
//! ## 实现思路
//!
//! - 预算通过 `Arc<RwLock<CompressionOptions>>` 支持运行时改配。
//! - 单次请求内使用“同一预算快照”，避免处理中途配置漂移。
//! - 解码与每一趟编码都提交到阻塞线程池执行，调用方任务只在各阶段挂起等待。
//! - 纠偏重编码只做一次；仍超预算时按现状返回，超预算不是错误。
//! - 记录 `decode/encode/total` 阶段耗时，便于性能诊断。

use image::{DynamicImage, GenericImageView};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::{encoder, pipeline};
use super::{CompressError, CompressionOptions, EncodedImage, OutputFormat, SourceImage};

/// 编码趟数与纠偏参数的内部汇总。
struct PassSummary {
    encode_passes: u8,
    first_pass_bytes: Option<u64>,
    retry_quality: Option<f32>,
}

/// 压缩结果报告。
///
/// 除结果本身外，附带体积、尺寸与压缩率等观测值；
/// `encode_passes` 与 `retry_quality` 可用于确认纠偏策略是否触发。
#[derive(Debug, Clone)]
pub struct CompressionReport {
    /// 编码结果。
    pub result: EncodedImage,
    /// 来源字节数。
    pub original_bytes: u64,
    /// 结果字节数。
    pub result_bytes: u64,
    /// 结果像素宽度（透传结果为 0）。
    pub width: u32,
    /// 结果像素高度（透传结果为 0）。
    pub height: u32,
    /// 压缩率 = 结果字节数 / 来源字节数（来源为空时记为 1）。
    pub ratio: f64,
    /// 实际发生的编码趟数（透传为 0，预算内为 1，纠偏后为 2）。
    pub encode_passes: u8,
    /// 首趟编码的字节数（透传时为空）。
    pub first_pass_bytes: Option<u64>,
    /// 纠偏趟使用的质量（未触发纠偏时为空）。
    pub retry_quality: Option<f32>,
}

/// 图片压缩器。
///
/// 封装预算状态，并编排解码、降采样与质量编码各子模块。
pub struct Compressor {
    options: Arc<RwLock<CompressionOptions>>,
}

impl Compressor {
    /// 根据预算创建压缩器，预算在此处统一校验。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use object_gallery::compressor::{CompressionOptions, Compressor};
    ///
    /// let compressor = Compressor::new(CompressionOptions::default())?;
    /// # Ok::<(), object_gallery::compressor::CompressError>(())
    /// ```
    pub fn new(options: CompressionOptions) -> Result<Self, CompressError> {
        options.validate()?;
        Ok(Self {
            options: Arc::new(RwLock::new(options)),
        })
    }

    /// 获取预算快照。
    ///
    /// 作用：保证单次压缩链路使用一致参数。
    fn options_snapshot(&self) -> Result<CompressionOptions, CompressError> {
        self.options
            .read()
            .map(|options| options.clone())
            .map_err(|_| CompressError::Interrupted("预算读取锁已中毒".to_string()))
    }

    /// 运行时替换预算，新的预算同样经过校验。
    pub fn set_options(&self, options: CompressionOptions) -> Result<(), CompressError> {
        options.validate()?;

        let mut guard = self
            .options
            .write()
            .map_err(|_| CompressError::Interrupted("预算写入锁已中毒".to_string()))?;
        *guard = options;

        Ok(())
    }

    /// 读取当前生效预算。
    pub fn options(&self) -> Result<CompressionOptions, CompressError> {
        self.options_snapshot()
    }

    /// 压缩主入口。
    ///
    /// 非图片来源直接按原始字节透传（预算被忽略）；
    /// 图片来源经历解码、等比降采样与质量编码，超出体积预算时降质重编码一次。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use object_gallery::compressor::{CompressionOptions, Compressor, SourceImage};
    ///
    /// # async fn demo() -> Result<(), object_gallery::compressor::CompressError> {
    /// let compressor = Compressor::new(CompressionOptions::default())?;
    /// let source = SourceImage::from_file("photo.png").await?;
    /// let encoded = compressor.compress(&source).await?;
    /// println!("{}", encoded.to_data_url());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn compress(&self, source: &SourceImage) -> Result<EncodedImage, CompressError> {
        let (encoded, _) = self.compress_inner(source).await?;
        Ok(encoded)
    }

    /// 压缩并生成观测报告。
    ///
    /// 报告中的最终尺寸通过回读结果字节获得，而非沿用流水线中间值；
    /// 透传结果没有像素面，宽高记为 0。
    pub async fn compress_with_report(
        &self,
        source: &SourceImage,
    ) -> Result<CompressionReport, CompressError> {
        let original_bytes = source.len() as u64;
        let (result, summary) = self.compress_inner(source).await?;

        let (width, height) = if result.mime().starts_with("image/") && !result.is_empty() {
            let bytes = result.bytes().to_vec();
            tokio::task::spawn_blocking(move || pipeline::read_dimensions(&bytes))
                .await
                .map_err(|e| CompressError::Interrupted(format!("尺寸回读任务异常终止：{}", e)))??
        } else {
            (0, 0)
        };

        let result_bytes = result.len() as u64;
        let ratio = if original_bytes == 0 {
            1.0
        } else {
            result_bytes as f64 / original_bytes as f64
        };

        Ok(CompressionReport {
            result,
            original_bytes,
            result_bytes,
            width,
            height,
            ratio,
            encode_passes: summary.encode_passes,
            first_pass_bytes: summary.first_pass_bytes,
            retry_quality: summary.retry_quality,
        })
    }

    async fn compress_inner(
        &self,
        source: &SourceImage,
    ) -> Result<(EncodedImage, PassSummary), CompressError> {
        let options = self.options_snapshot()?;
        let total_start = Instant::now();

        if !source.is_image() {
            log::info!(
                "📄 非图片来源（{}），跳过压缩直接透传",
                source.media_kind_or_default()
            );
            let encoded =
                EncodedImage::new(source.media_kind_or_default(), source.bytes().to_vec());
            return Ok((
                encoded,
                PassSummary {
                    encode_passes: 0,
                    first_pass_bytes: None,
                    retry_quality: None,
                },
            ));
        }

        let budget_bytes = options.budget_bytes();
        if source.len() as u64 > budget_bytes {
            log::info!(
                "🗜️ 来源体积超出预算（{}KB > {}KB），执行压缩",
                source.len() / 1024,
                options.max_size_kb
            );
        }

        let decode_start = Instant::now();
        let surface = {
            let bytes = source.bytes().to_vec();
            let options = options.clone();
            tokio::task::spawn_blocking(move || {
                let decoded = pipeline::decode_image(&bytes)?;
                pipeline::scale_to_fit(decoded, &options)
            })
            .await
            .map_err(|e| CompressError::Interrupted(format!("解码任务异常终止：{}", e)))??
        };
        let decode_elapsed = decode_start.elapsed();

        let surface = Arc::new(surface);
        let (width, height) = surface.dimensions();

        let encode_start = Instant::now();
        let first_pass = Self::encode_on_blocking_pool(
            Arc::clone(&surface),
            options.output_format,
            options.quality,
        )
        .await?;
        let first_pass_len = first_pass.len() as u64;

        let (bytes, summary) = if first_pass_len > budget_bytes {
            let retry_quality =
                encoder::corrective_quality(options.quality, budget_bytes, first_pass_len);
            log::warn!(
                "⚠️ 首趟编码超出预算（{}KB > {}KB），降质重编码：quality={:.2}",
                first_pass_len / 1024,
                options.max_size_kb,
                retry_quality
            );

            let second_pass = Self::encode_on_blocking_pool(
                Arc::clone(&surface),
                options.output_format,
                retry_quality,
            )
            .await?;

            if second_pass.len() as u64 > budget_bytes {
                log::warn!(
                    "⚠️ 纠偏编码仍超出预算（{}KB），按现状返回",
                    second_pass.len() / 1024
                );
            }

            (
                second_pass,
                PassSummary {
                    encode_passes: 2,
                    first_pass_bytes: Some(first_pass_len),
                    retry_quality: Some(retry_quality),
                },
            )
        } else {
            (
                first_pass,
                PassSummary {
                    encode_passes: 1,
                    first_pass_bytes: Some(first_pass_len),
                    retry_quality: None,
                },
            )
        };
        let encode_elapsed = encode_start.elapsed();

        log::info!(
            "✅ 压缩完成 - {}x{} decode={}ms encode={}ms total={}ms passes={}",
            width,
            height,
            decode_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            total_start.elapsed().as_millis(),
            summary.encode_passes
        );

        Ok((
            EncodedImage::new(options.output_format.mime_type(), bytes),
            summary,
        ))
    }

    async fn encode_on_blocking_pool(
        surface: Arc<DynamicImage>,
        format: OutputFormat,
        quality: f32,
    ) -> Result<Vec<u8>, CompressError> {
        tokio::task::spawn_blocking(move || encoder::encode_image(&surface, format, quality))
            .await
            .map_err(|e| CompressError::Interrupted(format!("编码任务异常终止：{}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_budget() {
        let mut options = CompressionOptions::default();
        options.quality = 0.0;

        assert!(matches!(
            Compressor::new(options),
            Err(CompressError::InvalidOptions(_))
        ));
    }

    #[test]
    fn set_options_validates_and_takes_effect() {
        let compressor =
            Compressor::new(CompressionOptions::default()).expect("compressor init failed");

        let mut next = CompressionOptions::default();
        next.max_width = 640;
        compressor
            .set_options(next)
            .expect("valid options should be accepted");
        assert_eq!(
            compressor.options().expect("options read failed").max_width,
            640
        );

        let mut invalid = CompressionOptions::default();
        invalid.max_size_kb = 0;
        assert!(matches!(
            compressor.set_options(invalid),
            Err(CompressError::InvalidOptions(_))
        ));
        // 非法预算不生效，旧预算保持不变。
        assert_eq!(
            compressor.options().expect("options read failed").max_width,
            640
        );
    }

    #[tokio::test]
    async fn declared_image_with_garbage_bytes_fails_as_decode_error() {
        let compressor =
            Compressor::new(CompressionOptions::default()).expect("compressor init failed");
        let source = SourceImage::from_parts(b"not an image at all".to_vec(), "image/png");

        let result = compressor.compress(&source).await;
        assert!(matches!(result, Err(CompressError::Decode(_))));
    }
}
