//! # 补间场景集成测试
//!
//! 通过公共 API 驱动 Tween，使用 FrameQueue 与脚本化时钟，不依赖真实时间。

use std::cell::RefCell;
use std::rc::Rc;

use phena::{
    EaseTarget, Easing, FrameQueue, ScriptedClock, Tween, TweenConfig, TweenRequest, TweenState,
    TweenValue,
};

/// 测试夹具：帧队列、时钟与事件日志
struct Harness {
    frames: Rc<FrameQueue>,
    clock: Rc<ScriptedClock>,
    log: Rc<RefCell<Vec<String>>>,
}

impl Harness {
    fn new(times: &[f64]) -> Self {
        Self {
            frames: Rc::new(FrameQueue::new()),
            clock: Rc::new(ScriptedClock::new(times.iter().copied())),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// 给请求挂上记录回调并构造 Tween
    fn spawn(&self, request: TweenRequest) -> Tween {
        let update_log = self.log.clone();
        let complete_log = self.log.clone();
        let request = request
            .on_update(move |v| {
                let json = serde_json::to_string(v).unwrap();
                update_log.borrow_mut().push(format!("update {json}"));
            })
            .on_complete(move || complete_log.borrow_mut().push("complete".to_string()));

        Tween::new(request, self.frames.clone(), self.clock.clone()).unwrap()
    }

    /// 跑若干帧
    fn run_frames(&self, n: usize) {
        for _ in 0..n {
            self.frames.run_frame();
        }
    }

    fn trace(&self) -> String {
        self.log.borrow().join("\n")
    }

    fn updates(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|line| line.starts_with("update"))
            .count()
    }
}

/// 测试标量补间
#[test]
fn test_scalar_tween() {
    let h = Harness::new(&[0.0, 250.0, 500.0, 1000.0]);
    let tween = h.spawn(TweenRequest::new(0.0, 250.0, 1000.0));

    h.run_frames(10);

    insta::assert_snapshot!(h.trace(), @r"
    update 62.5
    update 125.0
    update 250.0
    complete
    ");
    assert_eq!(tween.state(), TweenState::Completed);
    assert!(h.frames.is_idle());
}

/// 测试负方向补间
#[test]
fn test_negative_direction() {
    let h = Harness::new(&[0.0, 250.0, 500.0, 1000.0]);
    h.spawn(TweenRequest::new(0.0, -250.0, 1000.0));

    h.run_frames(10);

    insta::assert_snapshot!(h.trace(), @r"
    update -62.5
    update -125.0
    update -250.0
    complete
    ");
}

/// 测试多通道补间
#[test]
fn test_vector_tween() {
    let h = Harness::new(&[0.0, 250.0, 500.0, 1000.0]);
    h.spawn(TweenRequest::new([20.0, 0.0], [40.0, 100.0], 1000.0));

    h.run_frames(10);

    insta::assert_snapshot!(h.trace(), @r"
    update [25.0,25.0]
    update [30.0,50.0]
    update [40.0,100.0]
    complete
    ");
}

/// 测试延迟阶段不产生 update
#[test]
fn test_delay_gating() {
    let h = Harness::new(&[0.0, 190.0, 700.0, 1200.0]);
    let tween = h.spawn(TweenRequest::new(0.0, 250.0, 1000.0).with_delay(200.0));

    h.run_frames(1);
    assert_eq!(h.updates(), 0);
    assert_eq!(tween.state(), TweenState::Delaying);

    h.run_frames(1);
    assert_eq!(tween.state(), TweenState::Running);
    assert_eq!(tween.progress(), 0.5);

    h.run_frames(10);
    insta::assert_snapshot!(h.trace(), @r"
    update 125.0
    update 250.0
    complete
    ");
}

/// 测试暂停构造且从未 start 时没有任何回调
#[test]
fn test_paused_never_started() {
    let h = Harness::new(&[0.0, 1000.0]);
    let tween = h.spawn(TweenRequest::new(0.0, 250.0, 1000.0).with_paused(true));

    h.run_frames(10);

    assert_eq!(h.trace(), "");
    assert_eq!(tween.state(), TweenState::Unstarted);
    assert_eq!(h.clock.reads(), 0);
}

/// 测试暂停构造后显式 start
#[test]
fn test_paused_then_started() {
    let h = Harness::new(&[100.0, 600.0, 1100.0]);
    let tween = h.spawn(TweenRequest::new(0.0, 10.0, 1000.0).with_paused(true));

    h.run_frames(3);
    assert!(h.frames.is_idle());

    tween.start();
    h.run_frames(10);

    insta::assert_snapshot!(h.trace(), @r"
    update 5.0
    update 10.0
    complete
    ");
}

/// 测试时间超出时终值被修正为目标值
#[test]
fn test_overshoot_clamps_to_target() {
    let h = Harness::new(&[0.0, 1200.0]);
    h.spawn(TweenRequest::new(0.0, 250.0, 1000.0));

    h.run_frames(10);

    insta::assert_snapshot!(h.trace(), @r"
    update 250.0
    complete
    ");
}

/// 测试终值精确等于 to（不受浮点误差影响）
#[test]
fn test_final_value_is_exact() {
    let h = Harness::new(&[0.0, 333.0, 2000.0]);
    h.spawn(TweenRequest::new([0.1, 1.0 / 3.0], [0.3, 2.0 / 3.0], 1000.0));

    h.run_frames(10);

    let last = h
        .log
        .borrow()
        .iter()
        .rev()
        .find(|line| line.starts_with("update"))
        .cloned()
        .unwrap();
    let expected = serde_json::to_string(&TweenValue::from([0.3, 2.0 / 3.0])).unwrap();
    assert_eq!(last, format!("update {expected}"));
}

/// 测试恒等缓动下数值单调趋近目标
#[test]
fn test_progress_monotonic() {
    let times: Vec<f64> = (0..=20).map(|i| f64::from(i) * 60.0).collect();
    let clock = Rc::new(ScriptedClock::new(times));
    let frames = Rc::new(FrameQueue::new());
    let values = Rc::new(RefCell::new(Vec::new()));

    let sink = values.clone();
    Tween::new(
        TweenRequest::new(500.0, -500.0, 1000.0)
            .on_update(move |v| sink.borrow_mut().push(v.as_scalar().unwrap())),
        frames.clone(),
        clock,
    )
    .unwrap();

    while !frames.is_idle() {
        frames.run_frame();
    }

    let values = values.borrow();
    assert!(values.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(values.last().copied(), Some(-500.0));
}

/// 测试缓动函数收到的是归一化进度
#[test]
fn test_ease_receives_progress_fraction() {
    let h = Harness::new(&[0.0, 250.0, 500.0, 1000.0]);
    let calls = Rc::new(RefCell::new(Vec::new()));

    let c = calls.clone();
    h.spawn(TweenRequest::new(0.0, 300.0, 1000.0).with_easing(move |t: f64| {
        c.borrow_mut().push(t);
        t
    }));

    h.run_frames(10);

    assert_eq!(*calls.borrow(), vec![0.25, 0.5, 1.0]);
}

/// 测试缓动作用于插值结果（Value 变体）
#[test]
fn test_ease_target_value() {
    let h = Harness::new(&[0.0, 250.0, 500.0, 1000.0]);
    let calls = Rc::new(RefCell::new(Vec::new()));

    let c = calls.clone();
    h.spawn(
        TweenRequest::new(0.0, 250.0, 1000.0)
            .with_ease_target(EaseTarget::Value)
            .with_easing(Easing::custom(move |v| {
                c.borrow_mut().push(v);
                v * 2.0
            })),
    );

    h.run_frames(10);

    assert_eq!(*calls.borrow(), vec![62.5, 125.0, 250.0]);
    insta::assert_snapshot!(h.trace(), @r"
    update 125.0
    update 250.0
    update 500.0
    complete
    ");
}

/// 测试取消后不再有任何回调
#[test]
fn test_cancel_is_final() {
    let h = Harness::new(&[0.0, 250.0, 500.0, 1000.0]);
    let tween = h.spawn(TweenRequest::new(0.0, 250.0, 1000.0));

    h.run_frames(1);
    tween.cancel();
    assert!(h.frames.is_idle());
    assert!(!tween.has_pending_frame());

    h.run_frames(10);
    tween.cancel();

    insta::assert_snapshot!(h.trace(), @"update 62.5");
    assert_eq!(tween.state(), TweenState::Cancelled);
}

/// 测试两个补间互不影响
#[test]
fn test_independent_tweens() {
    let frames = Rc::new(FrameQueue::new());
    let clock = Rc::new(ScriptedClock::new([0.0, 0.0, 500.0, 500.0, 1000.0, 1000.0]));
    let a_values = Rc::new(RefCell::new(Vec::new()));
    let b_values = Rc::new(RefCell::new(Vec::new()));

    let sink = a_values.clone();
    let a = Tween::new(
        TweenRequest::new(0.0, 10.0, 1000.0).on_update(move |v| sink.borrow_mut().push(v.clone())),
        frames.clone(),
        clock.clone(),
    )
    .unwrap();
    let sink = b_values.clone();
    let b = Tween::new(
        TweenRequest::new([0.0, 0.0], [2.0, 4.0], 1000.0)
            .on_update(move |v| sink.borrow_mut().push(v.clone())),
        frames.clone(),
        clock.clone(),
    )
    .unwrap();

    frames.run_frame();
    a.cancel();
    while !frames.is_idle() {
        frames.run_frame();
    }

    assert_eq!(*a_values.borrow(), vec![TweenValue::Scalar(5.0)]);
    assert_eq!(
        *b_values.borrow(),
        vec![TweenValue::from([1.0, 2.0]), TweenValue::from([2.0, 4.0])]
    );
    assert_eq!(a.state(), TweenState::Cancelled);
    assert_eq!(b.state(), TweenState::Completed);
}

/// 测试非正时长在第一帧即完成
#[test]
fn test_zero_duration() {
    let h = Harness::new(&[0.0, 16.0]);
    h.spawn(TweenRequest::new(3.0, 7.0, 0.0));

    h.run_frames(10);

    insta::assert_snapshot!(h.trace(), @r"
    update 7.0
    complete
    ");
}

/// 测试从配置构造补间
#[test]
fn test_tween_from_config() {
    let config = TweenConfig::from_json(
        r#"{ "from": [20, 0], "to": [40, 100], "duration_ms": 1000, "delay_ms": 200 }"#,
    )
    .unwrap();
    config.validate().unwrap();

    let h = Harness::new(&[0.0, 100.0, 700.0, 1200.0]);
    h.spawn(config.to_request());

    h.run_frames(10);

    insta::assert_snapshot!(h.trace(), @r"
    update [30.0,50.0]
    update [40.0,100.0]
    complete
    ");
}

/// 测试形状不匹配在构造时报错
#[test]
fn test_shape_mismatch() {
    let frames = Rc::new(FrameQueue::new());
    let clock = Rc::new(ScriptedClock::new([0.0]));

    let err = Tween::new(TweenRequest::new(0.0, [1.0, 2.0], 1000.0), frames, clock).unwrap_err();
    assert_eq!(
        err.to_string(),
        "from/to 形状不匹配：from 为 标量，to 为 2 通道序列"
    );
}
