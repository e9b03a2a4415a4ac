//! 分析引擎
//!
//! 单线程、单遍：每条记录依注册表顺序分发给所有插件，之后再前进到下一条；
//! 记录源耗尽后依次 finalize 与 render 所有插件。

// 子模块声明
mod analysis;
mod combined;
mod config;
mod progress;

// 重新导出公共接口
pub use analysis::{Analysis, Engine, analyse, write_report};
pub use combined::CombinedResult;
pub use config::{DEFAULT_PROGRESS_INTERVAL, RunConfig};
pub use progress::{LogProgress, Progress, Silent};
