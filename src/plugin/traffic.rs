//! 流量统计
//!
//! 每个无序地址对两个方向各一个字节计数。键取该地址对第一次出现时的方向
//! （`"src: dst"`），之后同方向计入 `up`，反方向计入 `down`。
//! 因此 up/down 只相对于首次出现的方向，并不代表客户端/服务端。

use super::Plugin;
use super::field::parse_field;
use super::html::script_json;
use crate::error::PluginError;
use crate::record::{Record, fields};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficCounters {
    pub up: u64,
    pub down: u64,
}

#[derive(Debug, Default)]
pub struct TrafficPlugin {
    /// 以首次出现方向 (src, dst) 为键
    pairs: HashMap<(String, String), TrafficCounters>,
}

impl TrafficPlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for TrafficPlugin {
    type Summary = BTreeMap<String, TrafficCounters>;

    fn name(&self) -> &str {
        "Traffic"
    }

    fn update(&mut self, record: &dyn Record) -> Result<(), PluginError> {
        let (Some(src), Some(dst)) = (record.field(fields::IP_SRC), record.field(fields::IP_DST))
        else {
            return Ok(());
        };
        let Some(len) = parse_field::<u64>(record, fields::FRAME_LEN)? else {
            return Ok(());
        };

        let forward = (src.to_string(), dst.to_string());
        if let Some(counters) = self.pairs.get_mut(&forward) {
            counters.up = counters.up.saturating_add(len);
            return Ok(());
        }
        let reverse = (dst.to_string(), src.to_string());
        if let Some(counters) = self.pairs.get_mut(&reverse) {
            counters.down = counters.down.saturating_add(len);
            return Ok(());
        }
        self.pairs.insert(forward, TrafficCounters { up: len, down: 0 });
        Ok(())
    }

    fn finalize(&mut self) -> Result<Self::Summary, PluginError> {
        Ok(std::mem::take(&mut self.pairs)
            .into_iter()
            .map(|((src, dst), counters)| (format!("{src}: {dst}"), counters))
            .collect())
    }

    fn render(summary: &Self::Summary) -> String {
        let up: BTreeMap<&str, u64> = summary.iter().map(|(k, v)| (k.as_str(), v.up)).collect();
        let down: BTreeMap<&str, u64> =
            summary.iter().map(|(k, v)| (k.as_str(), v.down)).collect();
        format!(
            "<script>\n$(document).ready(function () {{\n    \
             const up = {up};\n    const down = {down};\n    \
             Plotly.newPlot('traffic_chart', [\n        \
             {{'x': Object.keys(up), 'y': Object.values(up), 'name': 'up', 'type': 'bar'}},\n        \
             {{'x': Object.keys(down), 'y': Object.values(down), 'name': 'down', 'type': 'bar'}}\n    \
             ], plotly_style);\n    \
             addEventListener('resize', () => {{ resize_plotly_chart('traffic_chart') }});\n}});\n\
             </script>\n<div id=\"traffic_chart\"></div>",
            up = script_json(&up),
            down = script_json(&down),
        )
    }
}
