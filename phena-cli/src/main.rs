//! # phena - 命令行宿主
//!
//! 以固定帧间隔驱动一个补间，每帧输出一行 JSON。
//!
//! ## 用法
//!
//! ```text
//! phena --from 0 --to 250 --duration 1000
//! phena --from 20,0 --to 40,100 --duration 1000 --delay 200
//! phena --config tween.json --cancel-after 500
//! ```
//!
//! 命令行参数覆盖配置文件中的同名项。

mod runner;

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use phena::{EaseTarget, MonotonicClock, TweenConfig, TweenValue};
use tracing::info;
use tracing_subscriber::EnvFilter;

use runner::{RunOptions, RunOutcome};

/// 缓动作用对象（命令行）
#[derive(Debug, Clone, Copy, ValueEnum)]
enum EaseTargetArg {
    Progress,
    Value,
}

impl From<EaseTargetArg> for EaseTarget {
    fn from(arg: EaseTargetArg) -> Self {
        match arg {
            EaseTargetArg::Progress => EaseTarget::Progress,
            EaseTargetArg::Value => EaseTarget::Value,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "phena", about = "按帧输出数值补间")]
struct Args {
    /// JSON 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 起始值，多通道用逗号分隔
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    from: Option<Vec<f64>>,

    /// 目标值，多通道用逗号分隔
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    to: Option<Vec<f64>>,

    /// 时长（毫秒）
    #[arg(long)]
    duration: Option<f64>,

    /// 延迟（毫秒）
    #[arg(long)]
    delay: Option<f64>,

    /// 帧间隔（毫秒）
    #[arg(long)]
    frame_interval: Option<f64>,

    /// 缓动作用对象
    #[arg(long, value_enum)]
    ease_target: Option<EaseTargetArg>,

    /// 开始后多少毫秒取消
    #[arg(long)]
    cancel_after: Option<f64>,

    /// 日志过滤（RUST_LOG 优先）
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// 单个数字视为标量，多个视为通道序列
fn to_value(values: Vec<f64>) -> TweenValue {
    match values.as_slice() {
        [single] => TweenValue::Scalar(*single),
        _ => TweenValue::Channels(values),
    }
}

/// 合并配置文件与命令行参数
fn resolve_config(args: &Args) -> TweenConfig {
    let mut config = match &args.config {
        Some(path) => TweenConfig::load(path),
        None => TweenConfig::default(),
    };

    if let Some(from) = &args.from {
        config.from = to_value(from.clone());
    }
    if let Some(to) = &args.to {
        config.to = to_value(to.clone());
    }
    if let Some(duration) = args.duration {
        config.duration_ms = duration;
    }
    if let Some(delay) = args.delay {
        config.delay_ms = delay;
    }
    if let Some(interval) = args.frame_interval {
        config.frame_interval_ms = interval;
    }
    if let Some(target) = args.ease_target {
        config.ease_target = target.into();
    }

    config
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("phena error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = resolve_config(&args);
    config.validate()?;
    info!(
        from = ?config.from,
        to = ?config.to,
        duration_ms = config.duration_ms,
        delay_ms = config.delay_ms,
        "开始补间"
    );

    let options = RunOptions {
        frame_interval: Duration::from_secs_f64(config.frame_interval_ms / 1000.0),
        cancel_after_ms: args.cancel_after,
    };

    let stdout = std::io::stdout();
    let outcome = runner::run(
        config.to_request(),
        Rc::new(MonotonicClock::new()),
        &options,
        &mut stdout.lock(),
    )?;

    match outcome {
        RunOutcome::Completed => info!("补间完成"),
        RunOutcome::Cancelled => info!("补间已取消"),
    }

    Ok(())
}
