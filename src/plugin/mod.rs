//! 分析插件
//!
//! 每个插件持有私有的聚合状态，逐条消费记录，结束时产出可序列化的汇总，
//! 再由汇总渲染出报告片段。
//!
//! 生命周期：`Created → Updating (0..N) → Finalized (1) → Rendered`。
//! [`Staged`] 负责强制这个顺序；重复 finalize 会被拒绝。

// 子模块声明
mod connections;
mod dns;
mod field;
mod html;
mod http;
mod protocols;
mod registry;
mod summary;
mod traffic;

// 重新导出公共接口
pub use connections::{ConnectionsPlugin, ConnectionsSummary};
pub use dns::{DnsPlugin, DnsRow, DnsSummary, ResolvedAddrs, qry_type_label};
pub use field::{parse_field, record_time};
pub use html::escape;
pub use http::{HttpPlugin, HttpRequest, HttpSummary, UrlStats};
pub use protocols::{ChartKind, LabelCounter, LabelCounts};
pub use registry::{PluginFactory, Registry, RegistryEntry};
pub use summary::{CaptureSummary, SummaryPlugin};
pub use traffic::{TrafficCounters, TrafficPlugin};

use crate::error::PluginError;
use crate::record::Record;
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

/// 插件接口（带类型的汇总）。
pub trait Plugin {
    type Summary: Serialize;

    /// 稳定且唯一的名称；作为输出中的键以及报告标签页的标题
    fn name(&self) -> &str;

    /// 消费一条记录。缺少所需字段时直接跳过，不返回错误。
    fn update(&mut self, record: &dyn Record) -> Result<(), PluginError>;

    /// 把聚合状态转换为可序列化、顺序确定的汇总。只会被调用一次。
    fn finalize(&mut self) -> Result<Self::Summary, PluginError>;

    /// 由汇总渲染报告片段；不能访问插件状态
    fn render(summary: &Self::Summary) -> String;
}

/// 插件所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Created,
    Updating,
    Finalized,
    Rendered,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Created => "created",
            Stage::Updating => "updating",
            Stage::Finalized => "finalized",
            Stage::Rendered => "rendered",
        }
    }
}

/// 类型擦除后的插件接口，引擎只通过它驱动插件。
pub trait DynPlugin {
    fn name(&self) -> &str;
    fn stage(&self) -> Stage;
    fn update(&mut self, record: &dyn Record) -> Result<(), PluginError>;
    fn finalize(&mut self) -> Result<Value, PluginError>;
    fn render(&mut self) -> Result<String, PluginError>;
}

/// 为 [`Plugin`] 加上生命周期检查，并把汇总转换为 JSON 树。
pub struct Staged<P: Plugin> {
    plugin: P,
    stage: Stage,
    summary: Option<P::Summary>,
}

impl<P: Plugin> Staged<P> {
    pub fn new(plugin: P) -> Self {
        Self {
            plugin,
            stage: Stage::Created,
            summary: None,
        }
    }

    fn reject(&self, action: &'static str) -> PluginError {
        PluginError::Lifecycle {
            plugin: self.plugin.name().to_string(),
            action,
            stage: self.stage.as_str(),
        }
    }
}

impl<P: Plugin> DynPlugin for Staged<P> {
    fn name(&self) -> &str {
        self.plugin.name()
    }

    fn stage(&self) -> Stage {
        self.stage
    }

    fn update(&mut self, record: &dyn Record) -> Result<(), PluginError> {
        match self.stage {
            Stage::Created => self.stage = Stage::Updating,
            Stage::Updating => {}
            Stage::Finalized | Stage::Rendered => return Err(self.reject("update")),
        }
        self.plugin.update(record)
    }

    fn finalize(&mut self) -> Result<Value, PluginError> {
        if matches!(self.stage, Stage::Finalized | Stage::Rendered) {
            return Err(self.reject("finalize"));
        }
        // 无论成功与否都不允许再次进入
        self.stage = Stage::Finalized;
        let summary = self.plugin.finalize()?;
        let value = serde_json::to_value(&summary)?;
        trace!(plugin = self.plugin.name(), "插件已完成汇总");
        self.summary = Some(summary);
        Ok(value)
    }

    fn render(&mut self) -> Result<String, PluginError> {
        let Some(summary) = self.summary.as_ref() else {
            return Err(self.reject("render"));
        };
        let out = P::render(summary);
        self.stage = Stage::Rendered;
        Ok(out)
    }
}

/// 包装并装箱
pub fn boxed<P: Plugin + 'static>(plugin: P) -> Box<dyn DynPlugin> {
    Box::new(Staged::new(plugin))
}
