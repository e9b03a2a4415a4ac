//! HTML 文档组装
//!
//! 标签页按片段顺序排布，只有第一个默认可见。

use super::CombinedReport;
use super::template::ReportTemplate;
use crate::plugin::escape;
use std::collections::HashSet;
use std::fmt::Write;

/// 组装后的标签页
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab<'a> {
    pub name: &'a str,
    /// 由名字得到的稳定 id（重复时追加 `-2`、`-3`…）
    pub id: String,
    pub body: &'a str,
    pub default_visible: bool,
}

/// 名字转成 `[a-z0-9-]` 组成的 id
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("section");
    }
    out
}

/// 按片段顺序排布标签页；只有第一个默认可见。
pub fn layout(report: &CombinedReport) -> Vec<Tab<'_>> {
    let mut used = HashSet::new();
    report
        .sections()
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let base = slug(&section.name);
            let mut id = base.clone();
            let mut n = 2;
            while !used.insert(id.clone()) {
                id = format!("{base}-{n}");
                n += 1;
            }
            Tab {
                name: &section.name,
                id,
                body: &section.body,
                default_visible: i == 0,
            }
        })
        .collect()
}

/// 生成完整的 HTML 文档
pub fn assemble(report: &CombinedReport, template: &ReportTemplate) -> String {
    let tabs = layout(report);
    let mut out = String::new();

    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}\n</head>\n<body>\n",
        escape(&template.title),
        template.head
    );
    let _ = writeln!(out, "<h1 class=\"ui header\">{}</h1>", escape(&template.title));

    out.push_str("<div class=\"ui top attached tabular menu\" id=\"plugin-tabs\">\n");
    for tab in &tabs {
        let _ = writeln!(
            out,
            "<div class=\"{}item\" data-tab=\"{}\">{}</div>",
            if tab.default_visible { "active " } else { "" },
            tab.id,
            escape(tab.name)
        );
    }
    out.push_str("</div>\n");

    for tab in &tabs {
        let _ = writeln!(
            out,
            "<div class=\"ui bottom attached {}tab segment\" data-tab=\"{}\">\n{}\n</div>",
            if tab.default_visible { "active " } else { "" },
            tab.id,
            tab.body
        );
    }

    out.push_str("</body>\n</html>\n");
    out
}
