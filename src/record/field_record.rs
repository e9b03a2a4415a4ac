//! 扁平字段记录
//!
//! 把嵌套的 JSON 对象压平成 `点分路径 -> 字符串值`。

use super::Record;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// 以扁平映射保存字段的记录。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord {
    fields: BTreeMap<String, String>,
    layers: BTreeSet<String>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置字段（builder 风格）
    pub fn with(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(path, value);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<String>) {
        let path = path.into();
        if let Some((layer, _)) = path.split_once('.') {
            self.layers.insert(layer.to_string());
        }
        self.fields.insert(path, value.into());
    }

    /// 从 JSON 对象构造。嵌套对象用 `.` 连接，数组按下标展开，`null` 视为缺失。
    pub fn from_json(obj: &Map<String, Value>) -> Self {
        let mut rec = Self::new();
        for (key, value) in obj {
            // 顶层对象即协议层，即使没有子字段
            if value.is_object() {
                rec.layers.insert(key.clone());
            }
            rec.flatten(key.clone(), value);
        }
        rec
    }

    fn flatten(&mut self, path: String, value: &Value) {
        match value {
            Value::Null => {}
            Value::Bool(b) => self.insert(path, b.to_string()),
            Value::Number(n) => self.insert(path, n.to_string()),
            Value::String(s) => self.insert(path, s.as_str()),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.flatten(format!("{path}.{i}"), item);
                }
            }
            Value::Object(children) => {
                for (key, child) in children {
                    self.flatten(format!("{path}.{key}"), child);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Record for FieldRecord {
    fn field(&self, path: &str) -> Option<&str> {
        self.fields.get(path).map(String::as_str)
    }

    fn has_layer(&self, layer: &str) -> bool {
        self.layers.contains(layer)
    }
}
