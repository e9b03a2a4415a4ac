//! 引擎主循环

use super::combined::CombinedResult;
use super::config::RunConfig;
use super::progress::{LogProgress, Progress};
use crate::error::Error;
use crate::plugin::{DynPlugin, Registry};
use crate::record::RecordSource;
use crate::report::{CombinedReport, ReportTemplate, assemble};
use std::collections::HashSet;
use std::io::Write;
use tracing::{debug, info, trace, warn};

/// 一次运行的产出
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub result: CombinedResult,
    pub report: CombinedReport,
    /// 处理过的记录数
    pub records: u64,
    /// 每个插件 update 失败（被跳过）的记录数，按注册表顺序
    pub update_failures: Vec<(String, u64)>,
}

/// 分析引擎：持有本次运行的插件实例，`run` 之后即被消耗。
pub struct Engine {
    plugins: Vec<Box<dyn DynPlugin>>,
    failures: Vec<u64>,
    progress_interval: u64,
}

impl Engine {
    /// 按注册表顺序实例化插件（可按 `config.plugins` 过滤）。
    pub fn new(registry: &Registry, config: &RunConfig) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        for entry in registry.entries() {
            if !seen.insert(entry.name) {
                return Err(Error::DuplicatePlugin(entry.name.to_string()));
            }
        }

        if let Some(wanted) = &config.plugins {
            for name in wanted {
                if !seen.contains(name.as_str()) {
                    return Err(Error::UnknownPlugin {
                        name: name.clone(),
                        available: registry.names().join(", "),
                    });
                }
            }
        }
        let selected = registry.entries().iter().filter(|entry| {
            config
                .plugins
                .as_ref()
                .is_none_or(|wanted| wanted.iter().any(|n| n == entry.name))
        });

        let mut plugins = Vec::new();
        for entry in selected {
            let plugin = (entry.factory)(config);
            if plugin.name() != entry.name {
                return Err(Error::Config(format!(
                    "registry entry `{}` produced plugin named `{}`",
                    entry.name,
                    plugin.name()
                )));
            }
            info!(plugin = entry.name, "已实例化插件");
            plugins.push(plugin);
        }
        if plugins.is_empty() {
            return Err(Error::Config("no plugins selected".to_string()));
        }

        Ok(Self {
            failures: vec![0; plugins.len()],
            plugins,
            progress_interval: config.progress_interval,
        })
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// 读完记录源，然后 finalize、render 所有插件。
    ///
    /// 单个插件对单条记录的 update 失败只会被记录日志并跳过；
    /// 记录源错误、finalize/render 错误是致命的。
    #[tracing::instrument(skip_all, fields(plugins = self.plugins.len()))]
    pub fn run<S: RecordSource>(
        mut self,
        mut source: S,
        progress: &mut dyn Progress,
    ) -> Result<Analysis, Error> {
        info!("▶️  开始分析");

        let mut records: u64 = 0;
        while let Some(record) = source.next_record()? {
            records += 1;
            trace!(record = records, "分发记录");

            for (plugin, failures) in self.plugins.iter_mut().zip(self.failures.iter_mut()) {
                if let Err(e) = plugin.update(&record) {
                    *failures += 1;
                    warn!(plugin = plugin.name(), record = records, error = %e, "插件处理记录失败，已跳过");
                }
            }
            // 本轮结束后不再持有该记录

            if self.progress_interval > 0 && records % self.progress_interval == 0 {
                progress.on_records(records);
            }
        }
        progress.on_finished(records);

        info!(records, "完成汇总");
        let mut result = CombinedResult::new();
        let mut report = CombinedReport::new();
        let mut update_failures = Vec::with_capacity(self.plugins.len());
        for (plugin, failures) in self.plugins.iter_mut().zip(self.failures.iter()) {
            let name = plugin.name().to_string();
            let summary = plugin.finalize().map_err(|source| Error::Finalize {
                plugin: name.clone(),
                source,
            })?;
            let body = plugin.render().map_err(|source| Error::Render {
                plugin: name.clone(),
                source,
            })?;
            debug!(plugin = %name, skipped = *failures, "插件已完成");

            result.insert(name.clone(), summary);
            report.push(name.clone(), body);
            update_failures.push((name, *failures));
        }

        debug!("关闭记录源");
        source.close()?;

        info!(records, plugins = result.len(), "✅ 分析完成");
        Ok(Analysis {
            result,
            report,
            records,
            update_failures,
        })
    }
}

/// 用内置插件分析记录源，写出 JSON；若给出 `html_out`，在 JSON 写出成功后再写 HTML 报告。
pub fn analyse<S: RecordSource>(
    source: S,
    config: &RunConfig,
    json_out: &mut dyn Write,
    html_out: Option<&mut dyn Write>,
) -> Result<Analysis, Error> {
    let engine = Engine::new(&Registry::builtin(), config)?;
    let analysis = engine.run(source, &mut LogProgress)?;

    analysis.result.write_pretty(&mut *json_out)?;
    json_out.write_all(b"\n")?;
    json_out.flush()?;
    info!("已写出 JSON 结果");

    if let Some(out) = html_out {
        write_report(&analysis.report, config, out)?;
    }
    Ok(analysis)
}

/// 按运行配置组装并写出 HTML 报告
pub fn write_report(
    report: &CombinedReport,
    config: &RunConfig,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let mut template = ReportTemplate::default();
    if let Some(title) = &config.report_title {
        template.title = title.clone();
    }
    out.write_all(assemble(report, &template).as_bytes())?;
    out.flush()?;
    info!("已写出 HTML 报告");
    Ok(())
}
