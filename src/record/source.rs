//! 记录源
//!
//! 只前进、只读一次。引擎在 finalize 之后调用 `close`。

use super::field_record::FieldRecord;
use super::Record;
use crate::error::SourceError;
use serde_json::Value;
use std::io::BufRead;
use tracing::{debug, trace};

/// 记录源接口
pub trait RecordSource {
    type Record: Record;

    /// 取下一条记录；`Ok(None)` 表示源已耗尽
    fn next_record(&mut self) -> Result<Option<Self::Record>, SourceError>;

    /// 释放底层资源
    fn close(self) -> Result<(), SourceError>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// 每行一个 JSON 对象的记录源（外部解码器的导出格式）。
pub struct JsonLinesSource<R> {
    reader: R,
    line: u64,
    buf: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// 已读取的行数（含空行）
    pub fn lines_read(&self) -> u64 {
        self.line
    }
}

impl<R: BufRead> RecordSource for JsonLinesSource<R> {
    type Record = FieldRecord;

    fn next_record(&mut self) -> Result<Option<FieldRecord>, SourceError> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() {
                trace!(line = self.line, "跳过空行");
                continue;
            }

            let value: Value = serde_json::from_str(text).map_err(|source| {
                SourceError::InvalidJson {
                    line: self.line,
                    source,
                }
            })?;
            let Value::Object(obj) = value else {
                return Err(SourceError::NotAnObject { line: self.line });
            };
            return Ok(Some(FieldRecord::from_json(&obj)));
        }
    }

    fn close(self) -> Result<(), SourceError> {
        debug!(lines = self.line, "关闭 JSON 记录源");
        Ok(())
    }
}

/// 由任意迭代器构成的内存记录源
pub struct IterSource<I> {
    inner: I,
}

impl<I> IterSource<I> {
    pub fn new<T>(records: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            inner: records.into_iter(),
        }
    }
}

impl<I, R> RecordSource for IterSource<I>
where
    I: Iterator<Item = R>,
    R: Record,
{
    type Record = R;

    fn next_record(&mut self) -> Result<Option<R>, SourceError> {
        Ok(self.inner.next())
    }
}
