//! # Value 模块
//!
//! 补间数值：单个标量，或若干个独立插值的通道。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TweenError;

/// 补间数值
///
/// 序列化为裸数字或数字数组（untagged），便于在配置文件里直接书写。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TweenValue {
    /// 单个数值
    Scalar(f64),
    /// 有序通道（例如坐标、颜色分量）
    Channels(Vec<f64>),
}

/// 数值形状
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Scalar,
    Channels(usize),
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueShape::Scalar => write!(f, "标量"),
            ValueShape::Channels(n) => write!(f, "{n} 通道序列"),
        }
    }
}

impl TweenValue {
    /// 获取形状
    pub fn shape(&self) -> ValueShape {
        match self {
            TweenValue::Scalar(_) => ValueShape::Scalar,
            TweenValue::Channels(values) => ValueShape::Channels(values.len()),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            TweenValue::Scalar(v) => Some(*v),
            TweenValue::Channels(_) => None,
        }
    }

    pub fn as_channels(&self) -> Option<&[f64]> {
        match self {
            TweenValue::Scalar(_) => None,
            TweenValue::Channels(values) => Some(values),
        }
    }

    /// 检查 `from` 与 `to` 形状一致
    pub fn check_shapes(from: &TweenValue, to: &TweenValue) -> Result<(), TweenError> {
        if from.shape() == to.shape() {
            Ok(())
        } else {
            Err(TweenError::ShapeMismatch {
                from: from.shape(),
                to: to.shape(),
            })
        }
    }

    /// 对每个通道做同一变换，保持形状
    pub(crate) fn zip_map(
        &self,
        to: &TweenValue,
        mut f: impl FnMut(f64, f64) -> f64,
    ) -> TweenValue {
        match (self, to) {
            (TweenValue::Scalar(a), TweenValue::Scalar(b)) => TweenValue::Scalar(f(*a, *b)),
            (TweenValue::Channels(a), TweenValue::Channels(b)) => {
                TweenValue::Channels(a.iter().zip(b).map(|(a, b)| f(*a, *b)).collect())
            }
            // 构造时已校验形状，这里只可能是两者一致的情况
            (from, _) => from.clone(),
        }
    }
}

/// 线性插值
///
/// `t == 1.0` 时直接返回 `to`，保证终值不受浮点误差影响。
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    if t == 1.0 { to } else { from + (to - from) * t }
}

impl From<f64> for TweenValue {
    fn from(value: f64) -> Self {
        TweenValue::Scalar(value)
    }
}

impl From<Vec<f64>> for TweenValue {
    fn from(values: Vec<f64>) -> Self {
        TweenValue::Channels(values)
    }
}

impl From<&[f64]> for TweenValue {
    fn from(values: &[f64]) -> Self {
        TweenValue::Channels(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for TweenValue {
    fn from(values: [f64; N]) -> Self {
        TweenValue::Channels(values.to_vec())
    }
}
