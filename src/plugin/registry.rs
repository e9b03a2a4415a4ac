//! 插件注册表
//!
//! 有序的插件工厂列表：决定运行哪些分析以及分发顺序（也是报告标签页的顺序）。

use super::{
    ConnectionsPlugin, DnsPlugin, DynPlugin, HttpPlugin, LabelCounter, SummaryPlugin,
    TrafficPlugin, boxed,
};
use crate::engine::RunConfig;
use std::fmt;

/// 每次运行为每个条目创建一个新实例
pub type PluginFactory = fn(&RunConfig) -> Box<dyn DynPlugin>;

#[derive(Clone, Copy)]
pub struct RegistryEntry {
    pub name: &'static str,
    pub factory: PluginFactory,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry").field("name", &self.name).finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    /// 空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置插件，按默认顺序
    pub fn builtin() -> Self {
        let mut reg = Self::new();
        reg.register("Summary", |cfg| {
            boxed(SummaryPlugin::new(cfg.source_name.clone()))
        });
        reg.register("Protocols", |_| boxed(LabelCounter::highest_layer()));
        reg.register("Connections (ipv4)", |_| boxed(ConnectionsPlugin::new()));
        reg.register("Layer 3 Protocols", |_| boxed(LabelCounter::network_layer()));
        reg.register("DNS", |_| boxed(DnsPlugin::new()));
        reg.register("HTTP", |_| boxed(HttpPlugin::new()));
        reg.register("Traffic", |_| boxed(TrafficPlugin::new()));
        reg
    }

    /// 追加一个插件。`name` 必须与实例的 `name()` 一致。
    pub fn register(&mut self, name: &'static str, factory: PluginFactory) {
        self.entries.push(RegistryEntry { name, factory });
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
