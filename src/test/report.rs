use crate::report::{CombinedReport, ReportTemplate, assemble, layout, slug};

fn sample() -> CombinedReport {
    let mut report = CombinedReport::new();
    report.push("Summary", "<p>summary</p>");
    report.push("Connections (ipv4)", "<p>connections</p>");
    report.push("DNS", "<p>dns</p>");
    report
}

#[test]
fn slugs_are_stable() {
    assert_eq!(slug("Connections (ipv4)"), "connections-ipv4");
    assert_eq!(slug("Layer 3 Protocols"), "layer-3-protocols");
    assert_eq!(slug("  "), "section");
}

#[test]
fn only_first_tab_is_default_visible() {
    let report = sample();
    let tabs = layout(&report);
    let names: Vec<_> = tabs.iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["Summary", "Connections (ipv4)", "DNS"]);
    let visible: Vec<_> = tabs.iter().map(|t| t.default_visible).collect();
    assert_eq!(visible, vec![true, false, false]);
}

#[test]
fn colliding_ids_get_a_suffix() {
    let mut report = CombinedReport::new();
    report.push("DNS", "a");
    report.push("dns", "b");
    let ids: Vec<_> = layout(&report).into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["dns".to_string(), "dns-2".to_string()]);
}

#[test]
fn document_keeps_section_order() {
    let html = assemble(&sample(), &ReportTemplate::new("capture", ""));

    let summary = html.find("<p>summary</p>").expect("summary body");
    let connections = html.find("<p>connections</p>").expect("connections body");
    let dns = html.find("<p>dns</p>").expect("dns body");
    assert!(summary < connections && connections < dns);

    assert_eq!(html.matches("class=\"active item\"").count(), 1);
    assert_eq!(
        html.matches("class=\"ui bottom attached active tab segment\"").count(),
        1
    );
    assert!(html.contains("class=\"active item\" data-tab=\"summary\""));
    assert!(html.contains(
        "class=\"ui bottom attached active tab segment\" data-tab=\"summary\""
    ));
    assert!(html.contains("<title>capture</title>"));
}

#[test]
fn tab_labels_are_escaped() {
    let mut report = CombinedReport::new();
    report.push("<b>", "body");
    let html = assemble(&report, &ReportTemplate::new("t", ""));
    assert!(html.contains(">&lt;b&gt;</div>"));
}
