//! # Error 模块
//!
//! 定义 phena 中使用的错误类型。

use thiserror::Error;

use crate::value::ValueShape;

/// 补间构造错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// `from` 与 `to` 的形状不一致（标量 vs 序列，或通道数不同）
    #[error("from/to 形状不匹配：from 为 {from}，to 为 {to}")]
    ShapeMismatch { from: ValueShape, to: ValueShape },
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 解析失败
    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),

    /// from/to 形状不匹配
    #[error(transparent)]
    Tween(#[from] TweenError),
}

/// Result 类型别名
pub type PhenaResult<T> = Result<T, TweenError>;
