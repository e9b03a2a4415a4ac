//! 报告模板
//!
//! 只提供页面标题与 `<head>` 中的公共资源，不做文本占位符替换。

/// 片段依赖的公共脚本：jQuery、Semantic UI 标签页、DataTables、Plotly 与连接图
const DEFAULT_HEAD: &str = r#"<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/fomantic-ui@2.9.3/dist/semantic.min.css">
<link rel="stylesheet" href="https://cdn.datatables.net/1.13.8/css/jquery.dataTables.min.css">
<script src="https://code.jquery.com/jquery-3.7.1.min.js"></script>
<script src="https://cdn.jsdelivr.net/npm/fomantic-ui@2.9.3/dist/semantic.min.js"></script>
<script src="https://cdn.datatables.net/1.13.8/js/jquery.dataTables.min.js"></script>
<script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
<style>
    body { padding: 1em; }
    .centered { margin: auto; }
    .overview svg line { stroke: #999; }
</style>
<script>
    const plotly_style = { responsive: true };

    function resize_plotly_chart(div) {
        Plotly.Plots.resize(document.getElementById(div));
    }

    // 简单的环形布局连接图
    function draw_overview(div, hosts, connections) {
        const el = document.getElementById(div);
        const size = 500, r = 200, c = size / 2;
        const pos = {};
        hosts.forEach((h, i) => {
            const a = 2 * Math.PI * i / Math.max(hosts.length, 1);
            pos[h] = [c + r * Math.cos(a), c + r * Math.sin(a)];
        });
        let svg = `<svg width="${size}" height="${size}">`;
        for (const src of Object.keys(connections)) {
            for (const dst of connections[src]) {
                const [x1, y1] = pos[src], [x2, y2] = pos[dst];
                svg += `<line x1="${x1}" y1="${y1}" x2="${x2}" y2="${y2}"/>`;
            }
        }
        for (const h of hosts) {
            const [x, y] = pos[h];
            svg += `<circle cx="${x}" cy="${y}" r="4"/><text x="${x + 6}" y="${y}">${h}</text>`;
        }
        el.innerHTML = svg + "</svg>";
    }

    $(document).ready(function () {
        $('.tabular.menu .item').tab();
    });
</script>"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTemplate {
    pub title: String,
    /// 原样插入 `<head>` 的标记
    pub head: String,
}

impl Default for ReportTemplate {
    fn default() -> Self {
        Self {
            title: "updog".to_string(),
            head: DEFAULT_HEAD.to_string(),
        }
    }
}

impl ReportTemplate {
    pub fn new(title: impl Into<String>, head: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            head: head.into(),
        }
    }
}
