//! # Engine 模块
//!
//! 补间引擎：单个补间的状态机。
//!
//! ## 执行模型
//!
//! ```text
//! new(request) ── start() ──► request_frame(step)
//!                                  │
//!                  ┌───────────────┘
//!                  ▼
//!               step():
//!                 1. elapsed = now - start_time
//!                 2. elapsed < delay → 再请求一帧
//!                 3. progress = clamp((elapsed - delay) / duration, 0, 1)
//!                 4. on_update(插值结果)
//!                 5. progress == 1 → on_complete()，结束
//!                    否则 → 再请求一帧
//! ```
//!
//! 任一时刻每个引擎最多只有一个待触发的帧回调。
//! 丢弃 [`Tween`] 句柄不会停止已经开始的补间，需要停止时调用 [`Tween::cancel`]。
//! 待触发的帧回调持有引擎，而引擎持有调度器：宿主在补间结束前同时丢弃调度器与
//! [`Tween`] 会形成 `Rc` 循环并泄漏，丢弃前应先调用 [`Tween::cancel`]。

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::easing::EaseTarget;
use crate::error::PhenaResult;
use crate::frame::{Clock, FrameHandle, FrameScheduler};
use crate::request::{Callbacks, TweenParams, TweenRequest};
use crate::value::{TweenValue, lerp};

/// 补间状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenState {
    /// 已构造，尚未开始
    #[default]
    Unstarted,
    /// 延迟阶段
    Delaying,
    /// 正在插值
    Running,
    /// 已完成
    Completed,
    /// 已取消
    Cancelled,
}

impl TweenState {
    /// 是否为活跃状态（仍在处理帧）
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Delaying | Self::Running)
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// 引擎私有的可变状态
#[derive(Debug, Default)]
struct EngineState {
    phase: TweenState,
    start_time: f64,
    /// 最近一帧的进度（已 clamp，未缓动）
    progress: f64,
    pending: Option<FrameHandle>,
    /// 每次 start() 递增，用于丢弃旧一轮残留的帧回调
    generation: u64,
}

enum StepOutcome {
    Hold,
    Update(f64),
}

struct Inner {
    params: TweenParams,
    callbacks: RefCell<Callbacks>,
    state: RefCell<EngineState>,
    scheduler: Rc<dyn FrameScheduler>,
    clock: Rc<dyn Clock>,
}

/// 补间引擎
///
/// # 使用示例
///
/// ```ignore
/// let frames = Rc::new(FrameQueue::new());
/// let clock = Rc::new(MonotonicClock::new());
///
/// let tween = Tween::new(
///     TweenRequest::new(0.0, 250.0, 1000.0).on_update(|v| println!("{v:?}")),
///     frames.clone(),
///     clock,
/// )?;
///
/// while !frames.is_idle() {
///     frames.run_frame();
/// }
/// ```
pub struct Tween {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for Tween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("params", &self.inner.params)
            .field("state", &self.inner.state.borrow())
            .finish()
    }
}

impl Tween {
    /// 创建补间
    ///
    /// 未设置 `paused` 时立即记录起始时间并请求第一帧。
    ///
    /// # 错误
    /// - `from` 与 `to` 形状不一致时返回 [`TweenError::ShapeMismatch`](crate::TweenError::ShapeMismatch)
    pub fn new(
        request: TweenRequest,
        scheduler: Rc<dyn FrameScheduler>,
        clock: Rc<dyn Clock>,
    ) -> PhenaResult<Self> {
        TweenValue::check_shapes(&request.from, &request.to)?;

        let paused = request.paused;
        let (params, callbacks) = request.resolve();

        let tween = Self {
            inner: Rc::new(Inner {
                params,
                callbacks: RefCell::new(callbacks),
                state: RefCell::new(EngineState::default()),
                scheduler,
                clock,
            }),
        };

        if !paused {
            tween.start();
        }

        Ok(tween)
    }

    /// 开始（或重新开始）补间
    ///
    /// 以当前时间为起点重新计时，丢弃尚未触发的帧。
    pub fn start(&self) {
        let stale = {
            let mut state = self.inner.state.borrow_mut();
            state.generation += 1;
            state.pending.take()
        };
        if let Some(handle) = stale {
            self.inner.scheduler.cancel_frame(handle);
        }

        let now = self.inner.clock.now_ms();
        let generation = {
            let mut state = self.inner.state.borrow_mut();
            if state.phase != TweenState::Unstarted {
                debug!(previous = ?state.phase, "补间重新开始");
            }
            state.start_time = now;
            state.progress = 0.0;
            state.phase = if self.inner.params.delay > 0.0 {
                TweenState::Delaying
            } else {
                TweenState::Running
            };
            state.generation
        };

        debug!(
            from = ?self.inner.params.from,
            to = ?self.inner.params.to,
            duration = self.inner.params.duration,
            delay = self.inner.params.delay,
            start_time = now,
            "补间开始"
        );

        self.inner.schedule(generation);
    }

    /// 取消补间
    ///
    /// 丢弃待触发的帧，之后不会再调用任何回调。对已结束的补间是空操作。
    pub fn cancel(&self) {
        let pending = {
            let mut state = self.inner.state.borrow_mut();
            if state.phase.is_finished() {
                return;
            }
            state.phase = TweenState::Cancelled;
            state.pending.take()
        };

        if let Some(handle) = pending {
            self.inner.scheduler.cancel_frame(handle);
        }
        debug!("补间已取消");
    }

    /// 当前状态
    pub fn state(&self) -> TweenState {
        self.inner.state.borrow().phase
    }

    /// 最近一帧的进度（0.0 - 1.0，未缓动）
    pub fn progress(&self) -> f64 {
        self.inner.state.borrow().progress
    }

    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    /// 是否有待触发的帧回调
    pub fn has_pending_frame(&self) -> bool {
        self.inner.state.borrow().pending.is_some()
    }
}

impl Inner {
    /// 请求下一帧
    fn schedule(self: &Rc<Self>, generation: u64) {
        let inner = Rc::clone(self);
        let handle = self
            .scheduler
            .request_frame(Box::new(move || inner.step(generation)));

        let mut state = self.state.borrow_mut();
        // 同步调度器可能已经在 request_frame 内部跑完了后续帧
        if state.generation == generation && state.phase.is_active() && state.pending.is_none() {
            state.pending = Some(handle);
        }
    }

    /// 单帧推进
    fn step(self: &Rc<Self>, generation: u64) {
        {
            let mut state = self.state.borrow_mut();
            if state.generation != generation || !state.phase.is_active() {
                trace!(phase = ?state.phase, "丢弃过期的帧回调");
                return;
            }
            state.pending = None;
        }

        let now = self.clock.now_ms();
        let outcome = {
            let mut state = self.state.borrow_mut();
            let elapsed = now - state.start_time;
            if elapsed < self.params.delay {
                state.phase = TweenState::Delaying;
                trace!(elapsed, delay = self.params.delay, "补间延迟中");
                StepOutcome::Hold
            } else {
                let progress = self.params.progress_at(elapsed);
                state.phase = TweenState::Running;
                state.progress = progress;
                trace!(elapsed, progress, "补间帧");
                StepOutcome::Update(progress)
            }
        };

        let progress = match outcome {
            StepOutcome::Hold => {
                self.schedule(generation);
                return;
            }
            StepOutcome::Update(progress) => progress,
        };

        let value = self.params.value_at(progress);
        match self.callbacks.try_borrow_mut() {
            Ok(mut callbacks) => (callbacks.on_update)(&value),
            Err(_) => warn!("on_update 重入，跳过本帧回调"),
        }

        // on_update 内部可能调用了 cancel() 或 start()
        if !self.is_current(generation) {
            return;
        }

        if progress >= 1.0 {
            self.state.borrow_mut().phase = TweenState::Completed;
            debug!(value = ?value, "补间完成");
            match self.callbacks.try_borrow_mut() {
                Ok(mut callbacks) => (callbacks.on_complete)(),
                Err(_) => warn!("on_complete 重入，跳过完成回调"),
            }
        } else {
            self.schedule(generation);
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        let state = self.state.borrow();
        state.generation == generation && state.phase.is_active()
    }
}

impl TweenParams {
    /// 由经过时间计算进度
    ///
    /// 时长非正或非有限时，延迟结束后的第一帧即为 1。
    pub(crate) fn progress_at(&self, elapsed: f64) -> f64 {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return 1.0;
        }
        ((elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    /// 由进度计算插值结果
    pub(crate) fn value_at(&self, progress: f64) -> TweenValue {
        match self.ease_target {
            EaseTarget::Progress => {
                let eased = self.easing.apply(progress);
                self.from.zip_map(&self.to, |a, b| lerp(a, b, eased))
            }
            EaseTarget::Value => self
                .from
                .zip_map(&self.to, |a, b| self.easing.apply(lerp(a, b, progress))),
        }
    }
}
