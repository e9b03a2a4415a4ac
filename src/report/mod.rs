//! 报告组装
//!
//! 每个插件的片段放进一个独立命名的标签页，顺序与注册表一致，
//! 第一个标签页默认可见。片段内容对组装器是不透明的。

// 子模块声明
mod assembler;
mod template;

// 重新导出公共接口
pub use assembler::{Tab, assemble, layout, slug};
pub use template::ReportTemplate;

/// 一个插件的报告片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub body: String,
}

/// 插件名 → 片段，按注册表顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedReport {
    sections: Vec<Section>,
}

impl CombinedReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.sections.push(Section {
            name: name.into(),
            body: body.into(),
        });
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.body.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
