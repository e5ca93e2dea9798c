//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调预算”集中到 `CompressionOptions`，保证运行时行为可观测、可调整、可测试。
//! 其中压缩预设（standard / upload）作为高层语义，映射到底层参数组合。
//!
//! ## 实现思路
//!
//! - `Default` 提供通用场景的平衡预算。
//! - `CompressionPreset` 负责预设字符串解析与反向输出。
//! - `validate` 在创建压缩器时统一校验参数区间，尽早拒绝非法预算。

use image::imageops::FilterType;

use super::CompressError;

/// 质量下限。无论预算超出多少，纠偏质量都不会低于该值。
pub const MIN_QUALITY: f32 = 0.1;

/// 输出编码格式。
///
/// 质量参数只影响 JPEG 编码；PNG 与无损 WebP 忽略质量。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    /// 从外部字符串解析格式。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use object_gallery::compressor::OutputFormat;
    ///
    /// let f = OutputFormat::from_str("jpeg")?;
    /// assert_eq!(f.mime_type(), "image/jpeg");
    /// # Ok::<(), object_gallery::compressor::CompressError>(())
    /// ```
    pub fn from_str(format: &str) -> Result<Self, CompressError> {
        match format.trim().to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::WebP),
            other => Err(CompressError::InvalidOptions(format!(
                "未知输出格式：{}（可选：jpeg / png / webp）",
                other
            ))),
        }
    }

    /// 输出格式对应的 MIME 类型，用于拼装 Data URL。
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }

    /// 将格式输出为稳定字符串，供命令行展示。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }
}

/// 单次压缩调用的预算配置。
///
/// 字段覆盖了尺寸上限、质量、体积预算与输出格式四类约束。
#[derive(Debug, Clone)]
pub struct CompressionOptions {
    /// 输出宽度上限（像素）。
    pub max_width: u32,
    /// 输出高度上限（像素）。
    pub max_height: u32,
    /// 首次编码质量（0.1 ~ 1.0）。
    pub quality: f32,
    /// 编码后体积预算（KB）。超出时触发一次降质重编码。
    pub max_size_kb: u64,
    /// 输出编码格式。
    pub output_format: OutputFormat,
    /// 降采样滤镜策略。
    pub resize_filter: FilterType,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_width: 1920,
            max_height: 1080,
            quality: 0.8,
            max_size_kb: 500,
            output_format: OutputFormat::Jpeg,
            resize_filter: FilterType::Triangle,
        }
    }
}

/// 压缩预设（面向产品语义）。
///
/// - `Standard`：通用预算，适合列表与详情展示
/// - `Upload`：创建表单上传预算，体积优先
#[derive(Debug, Clone, Copy)]
pub enum CompressionPreset {
    Standard,
    Upload,
}

impl CompressionPreset {
    /// 从外部字符串解析预设。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use object_gallery::compressor::CompressionPreset;
    ///
    /// let p = CompressionPreset::from_str("upload")?;
    /// assert_eq!(p.as_str(), "upload");
    /// # Ok::<(), object_gallery::compressor::CompressError>(())
    /// ```
    pub fn from_str(preset: &str) -> Result<Self, CompressError> {
        match preset.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "upload" => Ok(Self::Upload),
            other => Err(CompressError::InvalidOptions(format!(
                "未知压缩预设：{}（可选：standard / upload）",
                other
            ))),
        }
    }

    /// 将预设输出为稳定字符串。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Upload => "upload",
        }
    }
}

impl CompressionOptions {
    /// 按预设构造预算。
    ///
    /// `Upload` 对应创建表单的固定预算：宽度 800、质量 0.1、体积 100KB。
    pub fn preset(preset: CompressionPreset) -> Self {
        match preset {
            CompressionPreset::Standard => Self::default(),
            CompressionPreset::Upload => Self {
                max_width: 800,
                quality: 0.1,
                max_size_kb: 100,
                ..Self::default()
            },
        }
    }

    /// 校验预算参数区间。
    ///
    /// 在压缩器创建与运行时改配时统一调用，保证非法预算尽早失败。
    pub fn validate(&self) -> Result<(), CompressError> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(CompressError::InvalidOptions(
                "max_width / max_height 不能为 0".to_string(),
            ));
        }
        if !(MIN_QUALITY..=1.0).contains(&self.quality) {
            return Err(CompressError::InvalidOptions(format!(
                "quality 必须在 {}~1.0 之间：{}",
                MIN_QUALITY, self.quality
            )));
        }
        if self.max_size_kb == 0 {
            return Err(CompressError::InvalidOptions(
                "max_size_kb 不能为 0".to_string(),
            ));
        }

        Ok(())
    }

    /// 体积预算对应的字节数。
    pub(crate) fn budget_bytes(&self) -> u64 {
        self.max_size_kb.saturating_mul(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_documented_budget() {
        let options = CompressionOptions::default();

        assert_eq!(options.max_width, 1920);
        assert_eq!(options.max_height, 1080);
        assert!((options.quality - 0.8).abs() < f32::EPSILON);
        assert_eq!(options.max_size_kb, 500);
        assert_eq!(options.output_format, OutputFormat::Jpeg);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn upload_preset_matches_creation_form_budget() {
        let options = CompressionOptions::preset(CompressionPreset::Upload);

        assert_eq!(options.max_width, 800);
        assert_eq!(options.max_height, 1080);
        assert!((options.quality - 0.1).abs() < f32::EPSILON);
        assert_eq!(options.max_size_kb, 100);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_quality() {
        let mut options = CompressionOptions::default();

        options.quality = 0.05;
        assert!(matches!(
            options.validate(),
            Err(CompressError::InvalidOptions(_))
        ));

        options.quality = 1.5;
        assert!(matches!(
            options.validate(),
            Err(CompressError::InvalidOptions(_))
        ));

        options.quality = f32::NAN;
        assert!(matches!(
            options.validate(),
            Err(CompressError::InvalidOptions(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_budgets() {
        let mut options = CompressionOptions::default();
        options.max_width = 0;
        assert!(matches!(
            options.validate(),
            Err(CompressError::InvalidOptions(_))
        ));

        let mut options = CompressionOptions::default();
        options.max_size_kb = 0;
        assert!(matches!(
            options.validate(),
            Err(CompressError::InvalidOptions(_))
        ));
    }

    #[test]
    fn format_string_roundtrip() {
        assert_eq!(
            OutputFormat::from_str("JPG").expect("jpg should parse"),
            OutputFormat::Jpeg
        );
        assert_eq!(
            OutputFormat::from_str("webp").expect("webp should parse"),
            OutputFormat::WebP
        );
        assert!(matches!(
            OutputFormat::from_str("gif"),
            Err(CompressError::InvalidOptions(_))
        ));
        assert_eq!(OutputFormat::Png.as_str(), "png");
        assert_eq!(OutputFormat::Jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn preset_string_roundtrip() {
        assert!(matches!(
            CompressionPreset::from_str("upload").expect("upload should parse"),
            CompressionPreset::Upload
        ));
        assert!(matches!(
            CompressionPreset::from_str("fastest"),
            Err(CompressError::InvalidOptions(_))
        ));
        assert_eq!(CompressionPreset::Standard.as_str(), "standard");
    }
}
