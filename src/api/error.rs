//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 将网络层错误按调用侧关心的维度拆分：连接失败、超时、非成功状态码、
//! 响应解析失败。状态码错误携带数值与本地化文案，便于直接呈现。

/// REST 客户端统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 连接或传输层失败。
    #[error("网络错误：{0}")]
    Network(String),

    /// 请求超时。
    #[error("请求超时：{0}")]
    Timeout(String),

    /// 服务端返回非成功状态码。
    #[error("HTTP {status}：{message}")]
    Status { status: u16, message: &'static str },

    /// 响应体无法解析为预期结构。
    #[error("响应解析失败：{0}")]
    Decode(String),

    /// 服务地址格式非法。
    #[error("地址错误：{0}")]
    InvalidUrl(String),
}
