//! # Config 模块
//!
//! 补间的 JSON 配置描述。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高，由宿主负责合并）
//! 2. 配置文件
//! 3. 默认值（最低）
//!
//! ```json
//! {
//!   "from": [20, 0],
//!   "to": [40, 100],
//!   "duration_ms": 1000,
//!   "delay_ms": 200,
//!   "ease_target": "progress"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::easing::EaseTarget;
use crate::error::ConfigError;
use crate::request::TweenRequest;
use crate::value::TweenValue;

/// 补间配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweenConfig {
    /// 起始值（数字或数字数组）
    #[serde(default = "default_from")]
    pub from: TweenValue,

    /// 目标值（形状需与 `from` 一致）
    #[serde(default = "default_to")]
    pub to: TweenValue,

    /// 时长（毫秒）
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,

    /// 延迟（毫秒）
    #[serde(default)]
    pub delay_ms: f64,

    /// 是否以暂停状态构造
    ///
    /// 只影响 [`TweenConfig::to_request`] 生成的请求；由宿主决定何时 `start()`。
    /// `phena-cli` 没有外部触发源，会忽略此项并立即开始。
    #[serde(default)]
    pub paused: bool,

    /// 缓动作用对象
    #[serde(default)]
    pub ease_target: EaseTarget,

    /// 宿主帧循环的帧间隔（毫秒）
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: f64,
}

// 默认值函数
fn default_from() -> TweenValue {
    TweenValue::Scalar(0.0)
}

fn default_to() -> TweenValue {
    TweenValue::Scalar(1.0)
}

fn default_duration_ms() -> f64 {
    1000.0
}

fn default_frame_interval_ms() -> f64 {
    16.0
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            from: default_from(),
            to: default_to(),
            duration_ms: default_duration_ms(),
            delay_ms: 0.0,
            paused: false,
            ease_target: EaseTarget::default(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl TweenConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并打印警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => {
                info!(path = ?path, "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(error = %e, "配置文件加载失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 读取配置文件，失败时返回错误
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        TweenValue::check_shapes(&self.from, &self.to)?;

        if !self.duration_ms.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "duration_ms 必须是有限数值".to_string(),
            ));
        }

        if !self.delay_ms.is_finite() || self.delay_ms < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "delay_ms 必须是非负的有限数值".to_string(),
            ));
        }

        if !self.frame_interval_ms.is_finite() || self.frame_interval_ms < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "frame_interval_ms 必须是非负的有限数值".to_string(),
            ));
        }

        Ok(())
    }

    /// 转换为补间请求（不含回调）
    pub fn to_request(&self) -> TweenRequest {
        TweenRequest::new(self.from.clone(), self.to.clone(), self.duration_ms)
            .with_delay(self.delay_ms)
            .with_ease_target(self.ease_target)
            .with_paused(self.paused)
    }
}
