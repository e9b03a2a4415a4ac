//! HTTP 请求概要
//!
//! 只统计带完整请求 URL 的记录。

use super::Plugin;
use super::field::record_time;
use super::html::{cell, script_json, table};
use crate::error::PluginError;
use crate::record::{Record, fields};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub time: Option<String>,
    pub url: String,
    pub method: Option<String>,
    pub referer: Option<String>,
}

/// 单个 URL 的聚合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlStats {
    pub count: u64,
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSummary {
    pub http_requests: Vec<HttpRequest>,
    pub http_method_summary: BTreeMap<String, u64>,
    pub http_requests_by_path: BTreeMap<String, UrlStats>,
}

#[derive(Debug, Default)]
struct UrlState {
    count: u64,
    methods: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct HttpPlugin {
    requests: Vec<HttpRequest>,
    methods: HashMap<String, u64>,
    by_url: HashMap<String, UrlState>,
}

impl HttpPlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for HttpPlugin {
    type Summary = HttpSummary;

    fn name(&self) -> &str {
        "HTTP"
    }

    fn update(&mut self, record: &dyn Record) -> Result<(), PluginError> {
        let Some(url) = record.field(fields::HTTP_FULL_URI) else {
            return Ok(());
        };
        let time = record_time(record)?;
        let method = record.field(fields::HTTP_METHOD).map(str::to_string);

        let stats = self.by_url.entry(url.to_string()).or_default();
        stats.count += 1;
        if let Some(m) = &method {
            stats.methods.insert(m.clone());
            *self.methods.entry(m.clone()).or_insert(0) += 1;
        }

        self.requests.push(HttpRequest {
            time,
            url: url.to_string(),
            method,
            referer: record.field(fields::HTTP_REFERER).map(str::to_string),
        });
        Ok(())
    }

    fn finalize(&mut self) -> Result<HttpSummary, PluginError> {
        let by_path = std::mem::take(&mut self.by_url)
            .into_iter()
            .map(|(url, state)| {
                let mut methods: Vec<String> = state.methods.into_iter().collect();
                methods.sort();
                (
                    url,
                    UrlStats {
                        count: state.count,
                        methods,
                    },
                )
            })
            .collect();
        Ok(HttpSummary {
            http_requests: std::mem::take(&mut self.requests),
            http_method_summary: std::mem::take(&mut self.methods).into_iter().collect(),
            http_requests_by_path: by_path,
        })
    }

    fn render(summary: &HttpSummary) -> String {
        let request_rows = summary.http_requests.iter().map(|req| {
            vec![
                cell(&req.time),
                req.url.clone(),
                cell(&req.method),
                cell(&req.referer),
            ]
        });
        let path_rows = summary.http_requests_by_path.iter().map(|(url, stats)| {
            vec![url.clone(), stats.count.to_string(), stats.methods.join(", ")]
        });

        format!(
            "<script>\n$(document).ready(function () {{\n    \
             $('#HTTP_request_table').DataTable();\n    \
             $('#HTTP_request_by_path_table').DataTable();\n    \
             const data = {methods};\n    \
             Plotly.newPlot('http-method-chart', [{{'labels': Object.keys(data), \
             'values': Object.values(data), 'type': 'pie'}}], plotly_style);\n    \
             addEventListener('resize', () => {{ resize_plotly_chart('http-method-chart') }});\n}});\n\
             </script>\n<div class=\"container centered\">\n\
             <div class=\"ui top attached tabular menu\">\n\
             <div class=\"active item\" data-tab=\"http-requests\">Requests</div>\n\
             <div class=\"item\" data-tab=\"http-method-summary\">Request Methods Summary</div>\n\
             <div class=\"item\" data-tab=\"http-requests-by-url\">Requests By URL</div>\n</div>\n\
             <div class=\"ui bottom attached active tab segment\" data-tab=\"http-requests\">\n{requests}\n</div>\n\
             <div class=\"ui bottom attached tab segment\" data-tab=\"http-method-summary\">\n\
             <div id=\"http-method-chart\" class=\"centered\"></div>\n</div>\n\
             <div class=\"ui bottom attached tab segment\" data-tab=\"http-requests-by-url\">\n{by_url}\n</div>\n\
             </div>",
            methods = script_json(&summary.http_method_summary),
            requests = table(
                "HTTP_request_table",
                &["Time", "Url", "Method", "Referer"],
                request_rows
            ),
            by_url = table(
                "HTTP_request_by_path_table",
                &["URL", "Request Count", "Methods"],
                path_rows
            ),
        )
    }
}
