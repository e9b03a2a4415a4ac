//! DNS 概要
//!
//! 对带 DNS 层的记录：
//! - 按到达顺序保存每条记录的摘要行；
//! - 按应答名汇总 IPv4/IPv6 地址。只有当记录同时带有至少一个地址字段时，
//!   应答名才会被记录。

use super::Plugin;
use super::field::{parse_field, record_time};
use super::html::{cell, table};
use crate::error::PluginError;
use crate::record::{Record, fields};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// 查询类型编码对应的助记符
const QRY_TYPE_NAMES: [(u32, &str); 3] = [(1, "A"), (5, "CNAME"), (28, "AAAA")];

/// `1` → `"1 (A)"`；未映射的编码只输出数字
pub fn qry_type_label(code: u32) -> String {
    match QRY_TYPE_NAMES.iter().find(|(c, _)| *c == code) {
        Some((_, name)) => format!("{code} ({name})"),
        None => code.to_string(),
    }
}

/// 单条 DNS 记录的摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRow {
    pub time: Option<String>,
    pub qry_name: Option<String>,
    pub qry_type: Option<String>,
    pub a: Option<String>,
    pub aaaa: Option<String>,
    pub cname: Option<String>,
    pub resp_name: Option<String>,
}

/// 某个名字解析出的地址
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAddrs {
    pub a: Vec<String>,
    pub aaaa: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsSummary {
    pub dns_packets: Vec<DnsRow>,
    pub ips: BTreeMap<String, ResolvedAddrs>,
}

#[derive(Debug, Default)]
struct AddrSets {
    a: HashSet<String>,
    aaaa: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct DnsPlugin {
    rows: Vec<DnsRow>,
    ips: HashMap<String, AddrSets>,
}

impl DnsPlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

fn owned(record: &dyn Record, path: &str) -> Option<String> {
    record.field(path).map(str::to_string)
}

fn into_sorted(set: HashSet<String>) -> Vec<String> {
    set.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

impl Plugin for DnsPlugin {
    type Summary = DnsSummary;

    fn name(&self) -> &str {
        "DNS"
    }

    fn update(&mut self, record: &dyn Record) -> Result<(), PluginError> {
        if !record.has_layer(fields::DNS) {
            return Ok(());
        }

        // 先解析可能出错的字段，保证出错时状态不被部分修改
        let time = record_time(record)?;
        let qry_type = parse_field::<u32>(record, fields::DNS_QRY_TYPE)?.map(qry_type_label);

        let row = DnsRow {
            time,
            qry_name: owned(record, fields::DNS_QRY_NAME),
            qry_type,
            a: owned(record, fields::DNS_A),
            aaaa: owned(record, fields::DNS_AAAA),
            cname: owned(record, fields::DNS_CNAME),
            resp_name: owned(record, fields::DNS_RESP_NAME),
        };

        let has_addr = row.a.is_some() || row.aaaa.is_some();
        if let (Some(name), true) = (&row.resp_name, has_addr) {
            let entry = self.ips.entry(name.clone()).or_default();
            if let Some(a) = &row.a {
                entry.a.insert(a.clone());
            }
            if let Some(aaaa) = &row.aaaa {
                entry.aaaa.insert(aaaa.clone());
            }
        }
        self.rows.push(row);
        Ok(())
    }

    fn finalize(&mut self) -> Result<DnsSummary, PluginError> {
        let ips = std::mem::take(&mut self.ips)
            .into_iter()
            .map(|(name, sets)| {
                (
                    name,
                    ResolvedAddrs {
                        a: into_sorted(sets.a),
                        aaaa: into_sorted(sets.aaaa),
                    },
                )
            })
            .collect();
        Ok(DnsSummary {
            dns_packets: std::mem::take(&mut self.rows),
            ips,
        })
    }

    fn render(summary: &DnsSummary) -> String {
        let ip_rows = summary
            .ips
            .iter()
            .map(|(name, addrs)| vec![name.clone(), addrs.a.join(", "), addrs.aaaa.join(", ")]);
        let packet_rows = summary.dns_packets.iter().map(|row| {
            vec![
                cell(&row.time),
                cell(&row.qry_name),
                cell(&row.qry_type),
                cell(&row.a),
                cell(&row.aaaa),
                cell(&row.cname),
                cell(&row.resp_name),
            ]
        });

        format!(
            "<script>\n$(document).ready(function () {{\n    $('#DNS_ips_table').DataTable();\n    \
             $('#DNS_table').DataTable();\n}});\n</script>\n\
             <div class=\"container centered\">\n\
             <div class=\"ui top attached tabular menu\">\n\
             <div class=\"active item\" data-tab=\"dns-ips\">ips</div>\n\
             <div class=\"item\" data-tab=\"dns-packet-summary\">Packet Summary</div>\n</div>\n\
             <div class=\"ui bottom attached active tab segment\" data-tab=\"dns-ips\">\n{ips}\n</div>\n\
             <div class=\"ui bottom attached tab segment\" data-tab=\"dns-packet-summary\">\n{packets}\n</div>\n\
             </div>",
            ips = table("DNS_ips_table", &["Hostname", "ipv4", "ipv6"], ip_rows),
            packets = table(
                "DNS_table",
                &["time", "qry_name", "qry_type", "a", "aaaa", "cname", "resp_name"],
                packet_rows
            ),
        )
    }
}
