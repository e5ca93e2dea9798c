//! # 图片压缩模块（compressor）
//!
//! ## 设计思路
//!
//! 该模块将“来源读取 → 类型识别 → 解码缩放 → 质量编码 → 文本安全输出”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `config`：压缩预算、输出格式与预设
//! - `source`：来源与结果数据模型
//! - `pipeline`：解码、尺寸适配与降采样
//! - `encoder`：质量编码与纠偏参数计算
//! - `handler`：编排整条压缩流水线
//! - `error`：统一错误类型
//!
//! ## 实现思路
//!
//! 对外仅暴露必要类型，内部细节保持 `mod` 私有。
//! 体积预算是尽力而为的目标：超出时降质重编码一次，仍超出则按现状返回。
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! 调用方（上传服务 / 命令行）
//!    ↓
//! SourceImage（异步读取 + 媒体类型识别）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ pipeline.rs（解码 + 等比降采样，只缩不放）
//!    └─ encoder.rs（质量编码 + 预算纠偏一次）
//!    ↓
//! EncodedImage（Data URL 输出）/ CompressionReport（附观测值）
//! ```

mod config;
mod encoder;
mod error;
mod handler;
mod pipeline;
mod source;

pub use config::{CompressionOptions, CompressionPreset, MIN_QUALITY, OutputFormat};
pub use encoder::corrective_quality;
pub use error::CompressError;
pub use handler::{CompressionReport, Compressor};
pub use source::{EncodedImage, SourceImage};
