//! # Frame 模块
//!
//! 补间引擎依赖的两个外部协作者：帧调度器与时钟。
//!
//! ```text
//! Tween                          Host
//!   │── request_frame(cb) ──────►│
//!   │◄──────── FrameHandle ──────│
//!   │                            │ 下一次刷新
//!   │◄──────────── cb() ─────────│
//!   │── now_ms() ───────────────►│
//! ```
//!
//! 同时提供几个参考实现：
//! - [`FrameQueue`]：单线程帧队列，宿主每次刷新调用 `run_frame()`
//! - [`MonotonicClock`]：基于 `Instant` 的单调时钟
//! - [`ScriptedClock`]：按预设序列返回时间，用于测试与无头运行

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Instant;

/// 帧回调
pub type FrameCallback = Box<dyn FnOnce()>;

/// 已调度帧回调的句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// 帧调度器
///
/// 实现方需保证：每个回调最多被调用一次；`cancel_frame` 对已触发或未知句柄是空操作。
pub trait FrameScheduler {
    /// 请求在下一次刷新时调用 `callback`
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// 取消尚未触发的回调
    fn cancel_frame(&self, handle: FrameHandle);
}

/// 时钟，返回毫秒（可带小数）
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// 单线程帧队列
///
/// `run_frame()` 只触发调用前已排队的回调；回调执行期间新请求的帧留到下一次。
#[derive(Default)]
pub struct FrameQueue {
    queue: RefCell<VecDeque<(FrameHandle, FrameCallback)>>,
    next_id: Cell<u64>,
}

impl std::fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameQueue")
            .field("pending", &self.pending())
            .field("next_id", &self.next_id.get())
            .finish()
    }
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前排队的回调数量
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// 执行一帧
    ///
    /// # 返回
    /// - 本帧实际触发的回调数量
    pub fn run_frame(&self) -> usize {
        let boundary = FrameHandle(self.next_id.get());
        let mut fired = 0;

        loop {
            // 先释放借用再调用回调，回调内部可以继续 request/cancel
            let next = {
                let mut queue = self.queue.borrow_mut();
                match queue.front() {
                    Some((handle, _)) if *handle < boundary => queue.pop_front(),
                    _ => None,
                }
            };

            match next {
                Some((_, callback)) => {
                    callback();
                    fired += 1;
                }
                None => break,
            }
        }

        fired
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        self.queue.borrow_mut().push_back((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

/// 单调时钟
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// 脚本化时钟
///
/// 依次返回预设的时间戳，用完后一直返回最后一个值（空序列返回 0）。
#[derive(Debug, Default)]
pub struct ScriptedClock {
    times: RefCell<VecDeque<f64>>,
    last: Cell<f64>,
    reads: Cell<usize>,
}

impl ScriptedClock {
    pub fn new(times: impl IntoIterator<Item = f64>) -> Self {
        Self {
            times: RefCell::new(times.into_iter().collect()),
            last: Cell::new(0.0),
            reads: Cell::new(0),
        }
    }

    /// 追加时间戳
    pub fn push(&self, time: f64) {
        self.times.borrow_mut().push_back(time);
    }

    /// 已读取次数
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl Clock for ScriptedClock {
    fn now_ms(&self) -> f64 {
        self.reads.set(self.reads.get() + 1);
        if let Some(time) = self.times.borrow_mut().pop_front() {
            self.last.set(time);
        }
        self.last.get()
    }
}
