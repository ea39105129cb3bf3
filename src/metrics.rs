use std::sync::atomic::{AtomicU64, Ordering};

/// 错误信号聚合器
///
/// 运行器只向它上报事件，从不持有全局状态；每个步骤贡献一个样本。
pub trait ErrorSignal: Send + Sync {
    /// 上报一个步骤样本：success 为该步骤所有检查是否全部通过
    fn record(&self, success: bool);
}

/// 基于原子计数的错误率
///
/// 失败数与样本数的加和满足交换律和结合律，
/// 并发虚拟用户的写入顺序不影响最终比率
#[derive(Debug, Default)]
pub struct ErrorRate {
    failures: AtomicU64,
    samples: AtomicU64,
}

impl ErrorRate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 样本总数
    pub fn samples(&self) -> u64 {
        self.samples.load(Ordering::Relaxed)
    }

    /// 失败样本数
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// 失败比率，无样本时为 0.0
    pub fn rate(&self) -> f64 {
        let samples = self.samples();
        if samples == 0 {
            0.0
        } else {
            self.failures() as f64 / samples as f64
        }
    }
}

impl ErrorSignal for ErrorRate {
    fn record(&self, success: bool) {
        self.samples.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
    }
}
