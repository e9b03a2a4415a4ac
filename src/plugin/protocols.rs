//! 协议计数
//!
//! 两个独立的频数表插件：
//! - `Protocols`：按记录自报的最高层协议（`highest_layer`）计数。
//!   注意它可能把子层当成"最高层"，例如 HTTP 承载 JSON 时得到的是 MIME 层名。
//! - `Layer 3 Protocols`：按固定下标 `layers.1` 的协议名计数（通常是网络层）。
//!
//! 两者语义有重叠但不相同，保持各自原样。

use super::Plugin;
use super::html::{escape, script_json};
use crate::error::PluginError;
use crate::record::{Record, fields};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// 报告中的图表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
}

/// 以某个字段的值为键的频数表插件
#[derive(Debug)]
pub struct LabelCounter {
    name: &'static str,
    field: &'static str,
    chart: ChartKind,
    counts: HashMap<String, u64>,
}

impl LabelCounter {
    pub fn new(name: &'static str, field: &'static str, chart: ChartKind) -> Self {
        Self {
            name,
            field,
            chart,
            counts: HashMap::new(),
        }
    }

    /// 按最高层协议计数
    pub fn highest_layer() -> Self {
        Self::new("Protocols", fields::HIGHEST_LAYER, ChartKind::Bar)
    }

    /// 按 `layers.1` 计数
    pub fn network_layer() -> Self {
        Self::new("Layer 3 Protocols", fields::NETWORK_LAYER, ChartKind::Pie)
    }
}

/// 频数表汇总，带上图表类型以便渲染
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCounts {
    pub chart: ChartKind,
    pub counts: BTreeMap<String, u64>,
}

impl Serialize for LabelCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.counts.serialize(serializer)
    }
}

impl Plugin for LabelCounter {
    type Summary = LabelCounts;

    fn name(&self) -> &str {
        self.name
    }

    fn update(&mut self, record: &dyn Record) -> Result<(), PluginError> {
        if let Some(label) = record.field(self.field) {
            *self.counts.entry(label.to_string()).or_insert(0) += 1;
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<LabelCounts, PluginError> {
        Ok(LabelCounts {
            chart: self.chart,
            counts: std::mem::take(&mut self.counts).into_iter().collect(),
        })
    }

    fn render(summary: &LabelCounts) -> String {
        let div = match summary.chart {
            ChartKind::Bar => "protocol_chart",
            ChartKind::Pie => "l3_protocol_chart",
        };
        let trace = match summary.chart {
            ChartKind::Bar => "{'x': Object.keys(data), 'y': Object.values(data), 'type': 'bar'}",
            ChartKind::Pie => {
                "{'labels': Object.keys(data), 'values': Object.values(data), 'type': 'pie'}"
            }
        };
        format!(
            "<script>\n$(document).ready(function () {{\n    const data = {data};\n    \
             Plotly.newPlot('{div}', [{trace}], plotly_style);\n    \
             addEventListener('resize', () => {{ resize_plotly_chart('{div}') }});\n}});\n\
             </script>\n<div id=\"{id}\" class=\"centered\"></div>",
            data = script_json(&summary.counts),
            id = escape(div),
        )
    }
}
