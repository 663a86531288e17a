//! # phena
//!
//! 帧驱动的数值补间引擎。
//!
//! ## 架构概述
//!
//! `phena` 是纯逻辑核心，不依赖任何渲染或 IO。
//! 它通过两个注入的协作者与宿主通信：
//!
//! ```text
//! Host                              Tween
//!   │                                  │
//!   │◄──── request_frame(step) ────────│
//!   │                                  │
//!   │───── step() ────────────────────►│ now_ms()
//!   │                                  │ on_update(value)
//!   │◄──── request_frame(step) / 完成 ──│
//! ```
//!
//! ## 核心类型
//!
//! - [`Tween`]：补间状态机
//! - [`TweenRequest`]：起止值、时长、延迟、缓动与回调
//! - [`TweenValue`]：标量或多通道数值
//! - [`FrameScheduler`] / [`Clock`]：宿主提供的帧调度与时钟
//!
//! ## 使用示例
//!
//! ```ignore
//! use phena::{FrameQueue, MonotonicClock, Tween, TweenRequest};
//!
//! let frames = Rc::new(FrameQueue::new());
//! let tween = Tween::new(
//!     TweenRequest::new([20.0, 0.0], [40.0, 100.0], 1000.0)
//!         .with_delay(200.0)
//!         .on_update(|v| println!("{v:?}"))
//!         .on_complete(|| println!("done")),
//!     frames.clone(),
//!     Rc::new(MonotonicClock::new()),
//! )?;
//!
//! // 宿主在每次刷新时
//! frames.run_frame();
//! ```
//!
//! ## 模块结构
//!
//! - [`engine`]：补间状态机
//! - [`request`]：补间请求
//! - [`value`]：数值与插值
//! - [`easing`]：缓动
//! - [`frame`]：帧调度器与时钟
//! - [`config`]：JSON 配置
//! - [`error`]：错误类型定义

pub mod config;
pub mod easing;
pub mod engine;
pub mod error;
pub mod frame;
pub mod request;
pub mod value;

// 重导出核心类型
pub use config::TweenConfig;
pub use easing::{EaseTarget, Easing};
pub use engine::{Tween, TweenState};
pub use error::{ConfigError, PhenaResult, TweenError};
pub use frame::{
    Clock, FrameCallback, FrameHandle, FrameQueue, FrameScheduler, MonotonicClock, ScriptedClock,
};
pub use request::{CompleteCallback, TweenRequest, UpdateCallback};
pub use value::{TweenValue, ValueShape, lerp};
