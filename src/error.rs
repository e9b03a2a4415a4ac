//! 错误类型
//!
//! - [`enum@Error`]：一次分析运行的致命错误
//! - [`PluginError`]：单个插件的错误（更新期间的错误只影响该插件的该条记录）
//! - [`SourceError`]：记录源错误（总是致命）

use thiserror::Error;

/// 分析运行的错误。
#[derive(Error, Debug)]
pub enum Error {
    /// 无法从记录源取得下一条记录
    #[error("record source error: {0}")]
    Source(#[from] SourceError),

    #[error("plugin `{plugin}` failed to finalize: {source}")]
    Finalize {
        plugin: String,
        #[source]
        source: PluginError,
    },

    #[error("plugin `{plugin}` failed to render: {source}")]
    Render {
        plugin: String,
        #[source]
        source: PluginError,
    },

    /// 选择了注册表中不存在的插件
    #[error("unknown plugin `{name}` (available: {available})")]
    UnknownPlugin { name: String, available: String },

    #[error("plugin name `{0}` is registered more than once")]
    DuplicatePlugin(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 插件错误。
#[derive(Error, Debug)]
pub enum PluginError {
    /// 字段存在，但值无法按插件期望的类型解释
    #[error("malformed field `{field}`: {value:?} ({reason})")]
    MalformedField {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// 汇总必须至少看到一条记录
    #[error("{plugin}: capture contains no records")]
    EmptyCapture { plugin: String },

    /// 生命周期顺序被破坏（例如 finalize 之后再次 update）
    #[error("{plugin}: cannot {action} while {stage}")]
    Lifecycle {
        plugin: String,
        action: &'static str,
        stage: &'static str,
    },

    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 记录源错误。
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: invalid JSON record: {source}")]
    InvalidJson {
        line: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: record must be a JSON object")]
    NotAnObject { line: u64 },
}
