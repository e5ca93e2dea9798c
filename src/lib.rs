//! # 对象图库客户端 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 外部服务（REST API + 实时通道）            │
//! │                                                          │
//! │   POST/GET/DELETE /objects        objectCreated/Deleted  │
//! └───────┬──────────────────────────────────┬───────────────┘
//!         ↕ HTTP (JSON)                      ↓ 事件推送
//! ┌───────┼──────────────────────────────────┼───────────────┐
//! │       ↕           本客户端 (Rust)         ↓               │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ compressor ─ 自适应图片压缩流水线                      │
//! │  │   ├─ pipeline  解码 + 等比降采样（只缩不放）            │
//! │  │   └─ encoder   质量编码 + 预算纠偏一次                  │
//! │  │                                                       │
//! │  ├─ api ──────── 对象服务 REST 客户端                     │
//! │  ├─ events ───── 实时事件契约 + 本地列表更新               │
//! │  └─ uploader ─── 创建链路编排（校验·压缩·提交）            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，二进制入口的返回类型 |
//! | [`compressor`] | 图片解码、预算内降采样、质量编码与 Data URL 输出 |
//! | [`api`] | 对象服务的创建、列表、详情、删除接口 |
//! | [`events`] | `objectCreated` / `objectDeleted` 事件契约与列表合并 |
//! | [`uploader`] | 创建对象的完整链路（输入校验 + 上传预算压缩 + 提交） |

pub mod api;
pub mod compressor;
pub mod error;
pub mod events;
pub mod uploader;
