//! # 统一错误类型模块
//!
//! ## 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，替代各调用点分散的
//! `.map_err(|e| e.to_string())`、`format!(...)` 等不一致模式。
//!
//! 各子系统保留自己的错误枚举；`AppError` 通过 `From` 转换聚合它们，
//! 命令行入口与上传服务统一返回此类型。

use crate::api::ApiError;
use crate::compressor::CompressError;
use crate::events::EventError;

/// 应用级统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图片压缩流水线错误（读取 / 解码 / 编码）。
    #[error("{0}")]
    Compress(#[from] CompressError),

    /// 对象服务访问错误。
    #[error("{0}")]
    Api(#[from] ApiError),

    /// 实时事件解码错误。
    #[error("{0}")]
    Event(#[from] EventError),

    /// 调用方输入不满足必填约束。
    #[error("输入校验失败：{0}")]
    Validation(String),

    /// 输出序列化失败。
    #[error("序列化失败：{0}")]
    Serialize(#[from] serde_json::Error),

    /// 文件系统 I/O 错误。
    #[error("文件系统错误：{0}")]
    Io(#[from] std::io::Error),
}
