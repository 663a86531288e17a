//! # Request 模块
//!
//! 补间请求：调用方给出的起止值、时长与回调。
//!
//! 未设置的可选项在构造时解析为默认值：
//! - `delay` → 0
//! - `easing` → [`Easing::Identity`]
//! - `on_update` / `on_complete` → 空操作

use crate::easing::{EaseTarget, Easing};
use crate::value::TweenValue;

/// 每帧数值回调
pub type UpdateCallback = Box<dyn FnMut(&TweenValue)>;

/// 完成回调
pub type CompleteCallback = Box<dyn FnMut()>;

/// 补间请求
pub struct TweenRequest {
    /// 起始值
    pub from: TweenValue,
    /// 目标值（形状需与 `from` 一致）
    pub to: TweenValue,
    /// 时长（毫秒，不含延迟）
    pub duration: f64,
    /// 延迟启动（毫秒）
    pub delay: f64,
    /// 缓动函数
    pub easing: Easing,
    /// 缓动作用对象
    pub ease_target: EaseTarget,
    /// 构造后是否等待显式 `start()`
    pub paused: bool,
    pub(crate) on_update: Option<UpdateCallback>,
    pub(crate) on_complete: Option<CompleteCallback>,
}

impl std::fmt::Debug for TweenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenRequest")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("easing", &self.easing)
            .field("ease_target", &self.ease_target)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}

impl TweenRequest {
    /// 创建补间请求
    pub fn new(from: impl Into<TweenValue>, to: impl Into<TweenValue>, duration: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            duration,
            delay: 0.0,
            easing: Easing::default(),
            ease_target: EaseTarget::default(),
            paused: false,
            on_update: None,
            on_complete: None,
        }
    }

    /// 设置延迟（负数或非有限值按 0 处理）
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        self
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }

    /// 设置缓动作用对象
    pub fn with_ease_target(mut self, target: EaseTarget) -> Self {
        self.ease_target = target;
        self
    }

    /// 设置是否以暂停状态构造
    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// 设置每帧数值回调
    pub fn on_update(mut self, f: impl FnMut(&TweenValue) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// 设置完成回调
    pub fn on_complete(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// 拆分为不可变参数与回调，未设置的回调补为空操作
    pub(crate) fn resolve(self) -> (TweenParams, Callbacks) {
        let params = TweenParams {
            from: self.from,
            to: self.to,
            duration: self.duration,
            delay: if self.delay.is_finite() {
                self.delay.max(0.0)
            } else {
                0.0
            },
            easing: self.easing,
            ease_target: self.ease_target,
        };
        let callbacks = Callbacks {
            on_update: self.on_update.unwrap_or_else(|| Box::new(|_| {})),
            on_complete: self.on_complete.unwrap_or_else(|| Box::new(|| {})),
        };
        (params, callbacks)
    }
}

/// 解析后的补间参数（启动后不再变化）
#[derive(Debug, Clone)]
pub(crate) struct TweenParams {
    pub from: TweenValue,
    pub to: TweenValue,
    pub duration: f64,
    pub delay: f64,
    pub easing: Easing,
    pub ease_target: EaseTarget,
}

pub(crate) struct Callbacks {
    pub on_update: UpdateCallback,
    pub on_complete: CompleteCallback,
}
