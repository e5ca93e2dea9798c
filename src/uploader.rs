//! # 上传服务模块（可注入状态）
//!
//! ## 设计思路
//!
//! `UploadService` 封装“创建对象”的完整链路：输入校验 → 按上传预算压缩
//! → 提交创建请求。压缩器与 API 客户端在创建时注入，便于测试替换与
//! 按场景定制预算。
//!
//! ## 实现思路
//!
//! 上传链路默认使用 `upload` 预设（宽度 800、质量 0.1、体积 100KB），
//! 与创建表单的固定预算保持一致；调用方也可注入自定义压缩器。

use std::path::Path;

use crate::api::{ObjectRecord, ObjectsApi};
use crate::compressor::{CompressionOptions, CompressionPreset, Compressor, SourceImage};
use crate::error::AppError;

/// 对象上传服务。
pub struct UploadService {
    api: ObjectsApi,
    compressor: Compressor,
}

impl UploadService {
    /// 使用上传预设创建服务。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use object_gallery::api::ObjectsApi;
    /// use object_gallery::uploader::UploadService;
    ///
    /// # fn demo() -> Result<(), object_gallery::error::AppError> {
    /// let api = ObjectsApi::new("http://localhost:5005")?;
    /// let service = UploadService::new(api)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api: ObjectsApi) -> Result<Self, AppError> {
        let compressor =
            Compressor::new(CompressionOptions::preset(CompressionPreset::Upload))?;
        Ok(Self::with_compressor(api, compressor))
    }

    /// 注入自定义压缩器创建服务。
    ///
    /// 主要用于测试或按场景调整上传预算。
    pub fn with_compressor(api: ObjectsApi, compressor: Compressor) -> Self {
        Self { api, compressor }
    }

    /// 创建对象：校验输入、压缩图片并提交。
    ///
    /// 标题与描述为必填项；图片读取、压缩与提交中的任一失败都会
    /// 中止整条链路并上报，不会提交残缺数据。
    pub async fn create_object(
        &self,
        title: &str,
        description: &str,
        image_path: impl AsRef<Path>,
    ) -> Result<ObjectRecord, AppError> {
        if title.trim().is_empty() || description.trim().is_empty() {
            return Err(AppError::Validation(
                "标题与描述均为必填项".to_string(),
            ));
        }

        let source = SourceImage::from_file(image_path).await?;
        let encoded = self.compressor.compress(&source).await?;

        let record = self
            .api
            .create(title, description, &encoded.to_data_url())
            .await?;

        log::info!(
            "✅ 对象创建完成 - id: {} 图片体积: {}KB",
            record.id,
            encoded.len() / 1024
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ObjectsApi;

    #[tokio::test]
    async fn create_object_rejects_blank_title_and_description() {
        let api = ObjectsApi::new("http://localhost:5005").expect("client init failed");
        let service = UploadService::new(api).expect("service init failed");

        let result = service.create_object("  ", "desc", "unused.png").await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = service.create_object("title", "", "unused.png").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn create_object_reports_missing_image_file() {
        let api = ObjectsApi::new("http://localhost:5005").expect("client init failed");
        let service = UploadService::new(api).expect("service init failed");

        let result = service
            .create_object("title", "desc", "definitely-missing.png")
            .await;

        assert!(matches!(result, Err(AppError::Compress(_))));
    }
}
