//! # REST 客户端模块
//!
//! ## 设计思路
//!
//! 对象服务是外部系统，本模块只做透明代理：构造请求、校验状态码、
//! 解析响应，不做任何业务决策。HTTP 客户端在创建时构建一次并复用，
//! 显式设置请求与连接超时，避免悬挂请求。
//!
//! ## 实现思路
//!
//! - 非成功状态码统一映射为 `ApiError::Status`，附本地化文案。
//! - reqwest 错误按超时 / 连接 / 其他分类映射，便于调用侧区分处理。
//! - 服务地址优先取显式参数，其次环境变量，最后本地默认值。

use std::time::Duration;

use super::types::{CreateObjectRequest, ObjectRecord};
use super::ApiError;

/// 服务地址环境变量名。
pub const API_URL_ENV: &str = "OBJECT_GALLERY_API_URL";

/// 未配置服务地址时的本地默认值。
pub const DEFAULT_API_URL: &str = "http://localhost:5005";

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 8;

/// 对象服务 REST 客户端。
pub struct ObjectsApi {
    base_url: reqwest::Url,
    client: reqwest::Client,
}

impl ObjectsApi {
    /// 根据服务地址创建客户端。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use object_gallery::api::ObjectsApi;
    ///
    /// let api = ObjectsApi::new("http://localhost:5005")?;
    /// # Ok::<(), object_gallery::api::ApiError>(())
    /// ```
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("服务地址格式错误：{}", e)))?;

        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(ApiError::InvalidUrl("仅支持 HTTP/HTTPS".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Network(format!("无法创建 HTTP 客户端：{}", e)))?;

        Ok(Self { base_url, client })
    }

    /// 从环境变量读取服务地址创建客户端，未配置时用本地默认值。
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&base_url)
    }

    /// 创建对象：`POST /objects`。
    pub async fn create(
        &self,
        title: &str,
        description: &str,
        image_base64: &str,
    ) -> Result<ObjectRecord, ApiError> {
        log::info!("🌐 创建对象 - title: {}", title);

        let body = CreateObjectRequest {
            title: title.to_string(),
            description: description.to_string(),
            image_base64: image_base64.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint(None)?)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_status(&response)?;
        response
            .json::<ObjectRecord>()
            .await
            .map_err(|e| ApiError::Decode(format!("创建响应解析失败：{}", e)))
    }

    /// 获取对象列表：`GET /objects`。
    pub async fn list(&self) -> Result<Vec<ObjectRecord>, ApiError> {
        log::info!("🌐 获取对象列表");

        let response = self
            .client
            .get(self.endpoint(None)?)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_status(&response)?;
        response
            .json::<Vec<ObjectRecord>>()
            .await
            .map_err(|e| ApiError::Decode(format!("列表响应解析失败：{}", e)))
    }

    /// 获取单个对象：`GET /objects/:id`。
    pub async fn get(&self, id: &str) -> Result<ObjectRecord, ApiError> {
        log::info!("🌐 获取对象详情 - id: {}", id);

        let response = self
            .client
            .get(self.endpoint(Some(id))?)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_status(&response)?;
        response
            .json::<ObjectRecord>()
            .await
            .map_err(|e| ApiError::Decode(format!("详情响应解析失败：{}", e)))
    }

    /// 删除对象：`DELETE /objects/:id`。
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        log::info!("🗑️ 删除对象 - id: {}", id);

        let response = self
            .client
            .delete(self.endpoint(Some(id))?)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_status(&response)?;
        Ok(())
    }

    /// 拼装 `/objects` 或 `/objects/:id` 端点地址。
    fn endpoint(&self, id: Option<&str>) -> Result<reqwest::Url, ApiError> {
        let path = match id {
            Some(id) => format!("objects/{}", id),
            None => "objects".to_string(),
        };

        self.base_url
            .join(&path)
            .map_err(|e| ApiError::InvalidUrl(format!("端点地址拼装失败：{}", e)))
    }

    /// 校验响应状态码。
    fn check_status(response: &reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(ApiError::Status {
            status: status.as_u16(),
            message: Self::status_message(status.as_u16()),
        })
    }

    /// 统一映射 reqwest 错误到业务错误。
    fn map_request_error(e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(format!("请求超时（{}秒）", REQUEST_TIMEOUT_SECS))
        } else if e.is_connect() {
            ApiError::Network(format!("无法连接：{}", e))
        } else {
            ApiError::Network(format!("请求失败：{}", e))
        }
    }

    /// 常见 HTTP 状态码本地化文案。
    fn status_message(code: u16) -> &'static str {
        match code {
            404 => "未找到",
            403 => "访问被拒绝",
            500..=599 => "服务器错误",
            _ => "请求失败",
        }
    }
}
