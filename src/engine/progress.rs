//! 进度报告
//!
//! 进度只用于观察，不影响分析结果的正确性。

use tracing::info;

pub trait Progress {
    /// 每处理 `progress_interval` 条记录调用一次
    fn on_records(&mut self, analysed: u64);

    fn on_finished(&mut self, _total: u64) {}
}

/// 通过 tracing 输出进度
#[derive(Debug, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn on_records(&mut self, analysed: u64) {
        info!(records = analysed, "📦 分析中");
    }

    fn on_finished(&mut self, total: u64) {
        info!(records = total, "记录源已耗尽");
    }
}

/// 不报告进度
#[derive(Debug, Default)]
pub struct Silent;

impl Progress for Silent {
    fn on_records(&mut self, _analysed: u64) {}
}
