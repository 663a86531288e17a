//! # Runner 模块
//!
//! 无窗口的帧循环：按固定间隔执行 [`FrameQueue`]，把每帧数值写成 JSON 行。
//!
//! ```text
//! {"frame":1,"value":62.5}
//! {"frame":2,"value":125.0}
//! {"event":"complete","frame":4}
//! ```

use std::cell::{Cell, RefCell};
use std::io::Write;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use phena::{Clock, FrameQueue, Tween, TweenRequest};
use serde_json::{Value, json};
use tracing::{debug, info};

/// 帧循环参数
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// 帧间隔
    pub frame_interval: Duration,
    /// 从开始计时起多少毫秒后取消
    pub cancel_after_ms: Option<f64>,
}

/// 运行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

/// 驱动一个补间直到完成或被取消
pub fn run(
    request: TweenRequest,
    clock: Rc<dyn Clock>,
    options: &RunOptions,
    out: &mut impl Write,
) -> anyhow::Result<RunOutcome> {
    let frames = Rc::new(FrameQueue::new());
    let events: Rc<RefCell<Vec<Value>>> = Rc::new(RefCell::new(Vec::new()));
    let frame_no = Rc::new(Cell::new(0u64));

    let update_events = events.clone();
    let update_frame = frame_no.clone();
    let complete_events = events.clone();
    let complete_frame = frame_no.clone();
    let paused = request.paused;

    let request = request
        .on_update(move |value| {
            update_events
                .borrow_mut()
                .push(json!({ "frame": update_frame.get(), "value": value }));
        })
        .on_complete(move || {
            complete_events
                .borrow_mut()
                .push(json!({ "event": "complete", "frame": complete_frame.get() }));
        });

    let started_at = clock.now_ms();
    let tween = Tween::new(request, frames.clone(), clock.clone())?;
    // 命令行宿主没有外部触发源，paused 配置不生效
    if paused {
        info!("请求为 paused，宿主忽略并立即 start()");
        tween.start();
    }

    while !frames.is_idle() {
        thread::sleep(options.frame_interval);
        frame_no.set(frame_no.get() + 1);

        let fired = frames.run_frame();
        debug!(frame = frame_no.get(), fired, "帧");

        for event in events.borrow_mut().drain(..) {
            writeln!(out, "{event}")?;
        }

        if let Some(limit) = options.cancel_after_ms
            && tween.is_active()
            && clock.now_ms() - started_at >= limit
        {
            tween.cancel();
            writeln!(
                out,
                "{}",
                json!({ "event": "cancelled", "frame": frame_no.get() })
            )?;
            return Ok(RunOutcome::Cancelled);
        }
    }

    Ok(RunOutcome::Completed)
}
