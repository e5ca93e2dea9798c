//! # 对象服务接入模块（api）
//!
//! ## 设计思路
//!
//! 对象服务的增删查接口是外部协作方，本模块只承担边界职责：
//!
//! - `types`：线上 JSON 模型与 serde 重命名
//! - `client`：HTTP 请求编排与状态码校验
//! - `error`：网络层错误分类
//!
//! 响应与请求的业务含义由服务端定义，客户端不做二次加工。

mod client;
mod error;
mod types;

pub use client::{API_URL_ENV, DEFAULT_API_URL, ObjectsApi};
pub use error::ApiError;
pub use types::{CreateObjectRequest, ObjectRecord};
