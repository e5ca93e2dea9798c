//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载压缩链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//! 解码失败与编码失败是两类独立的失败条件，必须分开上报，绝不混为一谈。

/// 图片压缩统一错误类型。
///
/// 该类型会在二进制入口处被上转为 `AppError`，最终呈现给使用者。
#[derive(Debug, thiserror::Error)]
pub enum CompressError {
    /// 原始字节无法解释为图片。
    #[error("解码错误：{0}")]
    Decode(String),

    /// 底层编码器失败或未产生输出。
    #[error("编码错误：{0}")]
    Encode(String),

    /// 读取来源文件失败。
    #[error("文件错误：{0}")]
    FileSystem(String),

    /// 压缩预算参数非法。
    #[error("参数错误：{0}")]
    InvalidOptions(String),

    /// 后台计算任务异常终止。
    #[error("任务中断：{0}")]
    Interrupted(String),
}
