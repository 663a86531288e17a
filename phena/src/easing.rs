//! # Easing 模块
//!
//! 缓动函数：把进度分数映射为变换后的分数。
//!
//! 这里只内置恒等缓动，其余曲线由调用方以闭包形式提供。
//! 返回值不要求落在 `[0, 1]` 内，弹性/回弹类曲线可以越界。

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// 缓动函数
#[derive(Clone, Default)]
pub enum Easing {
    /// 恒等（线性）
    #[default]
    Identity,
    /// 调用方提供的曲线
    Custom(Rc<dyn Fn(f64) -> f64>),
}

impl Easing {
    /// 用闭包构造自定义缓动
    pub fn custom(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Easing::Custom(Rc::new(f))
    }

    /// 计算缓动值
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Identity => t,
            Easing::Custom(f) => f(t),
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Identity => write!(f, "Identity"),
            Easing::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl<F> From<F> for Easing
where
    F: Fn(f64) -> f64 + 'static,
{
    fn from(f: F) -> Self {
        Easing::custom(f)
    }
}

/// 缓动作用对象
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EaseTarget {
    /// 先对进度分数缓动，再插值（默认）
    #[default]
    Progress,
    /// 先线性插值，再对每个通道的结果缓动
    Value,
}
