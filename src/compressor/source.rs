//! # 数据源与结果模型
//!
//! ## 设计思路
//!
//! 将“外部输入类型”和“流水线输出结果”解耦：
//! - `SourceImage` 表示已读取但未解码的来源字节与媒体类型
//! - `EncodedImage` 表示编码完成、可文本安全传输的结果
//!
//! 来源一经读取即不可变；媒体类型优先采信调用方声明，缺省时按文件签名推断。

use base64::{Engine as _, engine::general_purpose};
use std::path::Path;

use super::CompressError;

/// 未知媒体类型的兜底 MIME。
const OCTET_STREAM_MIME: &str = "application/octet-stream";

/// 压缩输入来源：原始字节与媒体类型。
#[derive(Debug, Clone)]
pub struct SourceImage {
    bytes: Vec<u8>,
    media_kind: Option<String>,
}

impl SourceImage {
    /// 从本地文件读取来源。
    ///
    /// 读取为异步操作；媒体类型通过文件签名（magic bytes）推断。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use object_gallery::compressor::SourceImage;
    ///
    /// # async fn demo() -> Result<(), object_gallery::compressor::CompressError> {
    /// let source = SourceImage::from_file("photo.png").await?;
    /// assert!(source.is_image());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, CompressError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CompressError::FileSystem(format!(
                "文件不存在：{}",
                path.display()
            )));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| CompressError::FileSystem(format!("无法读取来源文件：{}", e)))?;

        log::info!(
            "📁 来源文件读取完成 - 路径: {} 体积: {}KB",
            path.display(),
            bytes.len() / 1024
        );

        Ok(Self::from_bytes(bytes))
    }

    /// 从内存字节构造来源，媒体类型按文件签名推断。
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let media_kind = infer::get(&bytes).map(|kind| kind.mime_type().to_string());
        Self { bytes, media_kind }
    }

    /// 从内存字节与调用方声明的媒体类型构造来源。
    ///
    /// 声明值直接采信，不再做签名推断。
    pub fn from_parts(bytes: Vec<u8>, media_kind: impl Into<String>) -> Self {
        Self {
            bytes,
            media_kind: Some(media_kind.into()),
        }
    }

    /// 来源是否为图片类型。
    ///
    /// 非图片来源会走透传路径，预算被完全忽略。
    pub fn is_image(&self) -> bool {
        self.media_kind
            .as_deref()
            .map(|kind| kind.starts_with("image/"))
            .unwrap_or(false)
    }

    /// 来源媒体类型（若可识别）。
    pub fn media_kind(&self) -> Option<&str> {
        self.media_kind.as_deref()
    }

    /// 来源媒体类型，不可识别时回退为 `application/octet-stream`。
    pub(crate) fn media_kind_or_default(&self) -> &str {
        self.media_kind.as_deref().unwrap_or(OCTET_STREAM_MIME)
    }

    /// 原始字节。
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 原始字节长度。
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 来源是否为空。
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 编码输出：MIME 与编码后字节，自描述且可文本安全传输。
#[derive(Debug, Clone)]
pub struct EncodedImage {
    mime: String,
    bytes: Vec<u8>,
}

impl EncodedImage {
    pub(crate) fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// 结果 MIME 类型。
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// 编码后字节。
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 编码后字节长度。
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 结果是否为空。
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 渲染为 Data URL（Base64），可直接嵌入 JSON 请求体。
    ///
    /// # 示例
    /// ```rust,ignore
    /// let url = encoded.to_data_url();
    /// assert!(url.starts_with("data:image/jpeg;base64,"));
    /// ```
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}
