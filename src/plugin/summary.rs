//! 抓包概要
//!
//! 记录第一条与最后一条记录（按流顺序，而不是时间戳）以及记录总数。
//! 空抓包没有首末记录可言，finalize 返回 [`PluginError::EmptyCapture`]，
//! 这是唯一一个要求至少一条记录的插件。

use super::Plugin;
use super::field::{epoch_to_iso, parse_field};
use super::html::escape;
use crate::error::PluginError;
use crate::record::{Record, fields};
use serde::{Deserialize, Serialize};

/// Summary 插件的输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureSummary {
    pub file_name: String,
    /// 第一条记录的时间（ISO-8601）
    pub start_time: Option<String>,
    pub number_of_packets: u64,
    /// 最后一条记录的相对时间（秒，保留两位小数）
    pub time_of_capture: Option<f64>,
}

#[derive(Debug)]
pub struct SummaryPlugin {
    file_name: String,
    count: u64,
    first_epoch: Option<f64>,
    last_relative: Option<f64>,
}

impl SummaryPlugin {
    /// `file_name` 由调用方提供（抓包文件名），不从记录中推导
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            count: 0,
            first_epoch: None,
            last_relative: None,
        }
    }
}

impl Plugin for SummaryPlugin {
    type Summary = CaptureSummary;

    fn name(&self) -> &str {
        "Summary"
    }

    fn update(&mut self, record: &dyn Record) -> Result<(), PluginError> {
        // 先解析全部字段；出错时不修改任何状态
        let first_epoch = if self.count == 0 {
            parse_field(record, fields::TIME_EPOCH)?
        } else {
            None
        };
        let last_relative = parse_field(record, fields::TIME_RELATIVE)?;

        self.count += 1;
        if self.count == 1 {
            self.first_epoch = first_epoch;
        }
        self.last_relative = last_relative;
        Ok(())
    }

    fn finalize(&mut self) -> Result<CaptureSummary, PluginError> {
        if self.count == 0 {
            return Err(PluginError::EmptyCapture {
                plugin: self.name().to_string(),
            });
        }
        let start_time = self
            .first_epoch
            .map(|secs| epoch_to_iso(fields::TIME_EPOCH, secs))
            .transpose()?;
        Ok(CaptureSummary {
            file_name: std::mem::take(&mut self.file_name),
            start_time,
            number_of_packets: self.count,
            time_of_capture: self.last_relative.map(|t| (t * 100.0).round() / 100.0),
        })
    }

    fn render(summary: &CaptureSummary) -> String {
        let stats = [
            ("File name", summary.file_name.clone()),
            ("Start time", summary.start_time.clone().unwrap_or_default()),
            (
                "Captured time (seconds)",
                summary
                    .time_of_capture
                    .map(|t| format!("{t:.2}"))
                    .unwrap_or_default(),
            ),
            ("Number of packets", summary.number_of_packets.to_string()),
        ];

        let mut out = String::from("<div>\n");
        for (label, value) in stats {
            out.push_str(&format!(
                "<div class=\"ui statistic\">\n<div class=\"label\">{}</div>\n\
                 <div class=\"value\" style=\"text-transform: none;\">{}</div>\n</div>\n<br/>\n",
                escape(label),
                escape(&value)
            ));
        }
        out.push_str("</div>");
        out
    }
}
