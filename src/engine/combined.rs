//! 合并结果
//!
//! 插件名 → 该插件的汇总。按注册表顺序保存并序列化，每个名字恰好一次。

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::io::Write;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedResult {
    entries: Vec<(String, Value)>,
}

impl CombinedResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个插件的汇总；名字已存在时返回 `false` 且不做修改
    pub fn insert(&mut self, name: impl Into<String>, summary: Value) -> bool {
        let name = name.into();
        if self.get(&name).is_some() {
            return false;
        }
        self.entries.push((name, summary));
        true
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// 按注册表顺序的插件名
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 以 4 空格缩进写出 JSON
    pub fn write_pretty<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut ser)
    }

    pub fn to_pretty_string(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        self.write_pretty(&mut buf)?;
        // serde_json 只会写出合法 UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Serialize for CombinedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, summary) in &self.entries {
            map.serialize_entry(name, summary)?;
        }
        map.end()
    }
}
