//! 运行配置
//!
//! 一次运行范围内的配置，显式传给引擎，再由注册表工厂转交给需要的插件。

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// 抓包来源标识（通常是文件名），由 Summary 插件输出
    #[serde(default)]
    pub source_name: String,
    /// 每处理多少条记录报告一次进度；0 表示不报告
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
    /// 只运行这些插件（仍按注册表顺序）；`None` 表示全部
    #[serde(default)]
    pub plugins: Option<Vec<String>>,
    #[serde(default)]
    pub report_title: Option<String>,
}

fn default_progress_interval() -> u64 {
    DEFAULT_PROGRESS_INTERVAL
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source_name: String::new(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            plugins: None,
            report_title: None,
        }
    }
}

impl RunConfig {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            ..Self::default()
        }
    }
}
