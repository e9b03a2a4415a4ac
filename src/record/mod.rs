//! 记录模块
//!
//! 一条记录是外部解码引擎产出的一个数据包视图：按点分路径查找字段，字段可能缺失。
//! 本模块定义记录能力接口、常用字段路径以及记录源。

// 子模块声明
mod field_record;
pub mod fields;
mod source;

// 重新导出公共接口
pub use field_record::FieldRecord;
pub use source::{IterSource, JsonLinesSource, RecordSource};

/// 只读记录接口。缺失的字段返回 `None`，这不是错误。
pub trait Record {
    /// 按点分路径查找字段，例如 `ip.src_host`、`layers.1`
    fn field(&self, path: &str) -> Option<&str>;

    /// 是否存在名为 `layer` 的协议层：存在任意 `layer.` 前缀的字段，
    /// 或者 JSON 记录里 `layer` 是顶层对象（可以为空）。顶层标量值不算协议层。
    fn has_layer(&self, layer: &str) -> bool;
}
