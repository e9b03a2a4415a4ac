//! 连接关系
//!
//! 收集出现过的网络层地址，以及每个源地址发往的目的地址集合（有向邻接）。

use super::Plugin;
use super::html::{escape, script_json, table};
use crate::error::PluginError;
use crate::record::{Record, fields};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Connections 插件输出。集合在输出时排序。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionsSummary {
    pub connections: BTreeMap<String, Vec<String>>,
    pub hosts: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ConnectionsPlugin {
    hosts: HashSet<String>,
    connections: HashMap<String, HashSet<String>>,
}

impl ConnectionsPlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(set: HashSet<String>) -> Vec<String> {
    let mut out: Vec<String> = set.into_iter().collect();
    out.sort();
    out
}

impl Plugin for ConnectionsPlugin {
    type Summary = ConnectionsSummary;

    fn name(&self) -> &str {
        "Connections (ipv4)"
    }

    fn update(&mut self, record: &dyn Record) -> Result<(), PluginError> {
        let (Some(src), Some(dst)) = (record.field(fields::IP_SRC), record.field(fields::IP_DST))
        else {
            return Ok(());
        };
        self.hosts.insert(src.to_string());
        self.hosts.insert(dst.to_string());
        self.connections
            .entry(src.to_string())
            .or_default()
            .insert(dst.to_string());
        Ok(())
    }

    fn finalize(&mut self) -> Result<ConnectionsSummary, PluginError> {
        let connections = std::mem::take(&mut self.connections)
            .into_iter()
            .map(|(src, dsts)| (src, sorted(dsts)))
            .collect();
        Ok(ConnectionsSummary {
            connections,
            hosts: sorted(std::mem::take(&mut self.hosts)),
        })
    }

    fn render(summary: &ConnectionsSummary) -> String {
        let rows = summary
            .connections
            .iter()
            .map(|(src, dsts)| vec![src.clone(), dsts.len().to_string(), dsts.join(", ")]);
        format!(
            "<script>\n$(document).ready(function () {{\n    const data = {data};\n    \
             draw_overview('connections_graph', data.hosts, data.connections);\n    \
             $('#connections_table').DataTable();\n}});\n</script>\n\
             <div id=\"connections_graph\" class=\"overview\"></div>\n\
             <p>{hosts} hosts</p>\n{table}",
            data = script_json(summary),
            hosts = escape(&summary.hosts.len().to_string()),
            table = table(
                "connections_table",
                &["Source", "Destinations", "Destination hosts"],
                rows
            ),
        )
    }
}
