//! 字段解析辅助函数

use crate::error::PluginError;
use crate::record::{Record, fields};
use chrono::DateTime;
use std::fmt::Display;
use std::str::FromStr;

/// 读取并解析字段。字段缺失返回 `Ok(None)`；无法解析返回 `MalformedField`。
pub fn parse_field<T>(record: &dyn Record, path: &'static str) -> Result<Option<T>, PluginError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = record.field(path) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|e| PluginError::MalformedField {
            field: path,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// 把 epoch 秒转换为 ISO-8601（UTC，微秒精度，无时区后缀）
pub fn epoch_to_iso(path: &'static str, secs: f64) -> Result<String, PluginError> {
    let malformed = |reason: &str| PluginError::MalformedField {
        field: path,
        value: secs.to_string(),
        reason: reason.to_string(),
    };
    if !secs.is_finite() {
        return Err(malformed("not a finite number"));
    }
    // 先整体舍入到微秒，避免小数部分的二进制误差被截断
    let micros = (secs * 1e6).round() as i64;
    let dt = DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| malformed("timestamp out of range"))?;
    Ok(dt.naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string())
}

/// 记录的抓包时间（ISO-8601）；字段缺失时为 `None`
pub fn record_time(record: &dyn Record) -> Result<Option<String>, PluginError> {
    parse_field::<f64>(record, fields::TIME_EPOCH)?
        .map(|secs| epoch_to_iso(fields::TIME_EPOCH, secs))
        .transpose()
}
