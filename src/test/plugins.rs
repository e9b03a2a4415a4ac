use super::common::{A, B, ip};
use crate::error::PluginError;
use crate::plugin::{
    ConnectionsPlugin, DnsPlugin, HttpPlugin, LabelCounter, Plugin, SummaryPlugin, TrafficCounters,
    TrafficPlugin, qry_type_label, record_time,
};
use crate::record::FieldRecord;

fn dns(name: &str, qry_type: &str) -> FieldRecord {
    FieldRecord::new()
        .with("frame_info.time_epoch", "0")
        .with("dns.qry_name", name)
        .with("dns.qry_type", qry_type)
}

fn http(url: &str, method: &str) -> FieldRecord {
    FieldRecord::new()
        .with("http.request_full_uri", url)
        .with("http.request_method", method)
}

#[test]
fn connections_deduplicate_repeated_pairs() {
    let mut plugin = ConnectionsPlugin::new();
    for _ in 0..5 {
        plugin.update(&ip(A, B, 60)).expect("update");
    }
    let summary = plugin.finalize().expect("finalize");
    assert_eq!(summary.connections.get(A), Some(&vec![B.to_string()]));
    assert_eq!(summary.connections.get(B), None);
    assert_eq!(summary.hosts, vec![A.to_string(), B.to_string()]);
}

#[test]
fn connections_ignore_records_without_addresses() {
    let mut plugin = ConnectionsPlugin::new();
    plugin
        .update(&FieldRecord::new().with("ip.src_host", A))
        .expect("update");
    let summary = plugin.finalize().expect("finalize");
    assert!(summary.hosts.is_empty());
    assert!(summary.connections.is_empty());
}

#[test]
fn traffic_direction_is_relative_to_first_seen() {
    let mut plugin = TrafficPlugin::new();
    plugin.update(&ip(A, B, 100)).expect("update");
    plugin.update(&ip(B, A, 40)).expect("update");

    let mut second = TrafficPlugin::new();
    second.update(&ip(A, B, 100)).expect("update");
    second.update(&ip(B, A, 40)).expect("update");
    second.update(&ip(A, B, 7)).expect("update");

    let summary = plugin.finalize().expect("finalize");
    assert_eq!(summary.len(), 1);
    assert_eq!(
        summary.get("10.0.0.1: 10.0.0.2"),
        Some(&TrafficCounters { up: 100, down: 40 })
    );

    let summary = second.finalize().expect("finalize");
    assert_eq!(
        summary.get("10.0.0.1: 10.0.0.2"),
        Some(&TrafficCounters { up: 107, down: 40 })
    );
}

#[test]
fn traffic_keys_by_reverse_direction_when_seen_first() {
    let mut plugin = TrafficPlugin::new();
    plugin.update(&ip(B, A, 10)).expect("update");
    plugin.update(&ip(A, B, 3)).expect("update");
    let summary = plugin.finalize().expect("finalize");
    assert_eq!(
        summary.get("10.0.0.2: 10.0.0.1"),
        Some(&TrafficCounters { up: 10, down: 3 })
    );
}

#[test]
fn traffic_rejects_non_numeric_length() {
    let mut plugin = TrafficPlugin::new();
    let bad = ip(A, B, 0).with("frame_info.len", "lots");
    assert!(matches!(
        plugin.update(&bad),
        Err(PluginError::MalformedField { field: "frame_info.len", .. })
    ));
    plugin.update(&ip(A, B, 5)).expect("update");
    let summary = plugin.finalize().expect("finalize");
    assert_eq!(
        summary.get("10.0.0.1: 10.0.0.2"),
        Some(&TrafficCounters { up: 5, down: 0 })
    );
}

#[test]
fn qry_type_mnemonics() {
    assert_eq!(qry_type_label(1), "1 (A)");
    assert_eq!(qry_type_label(5), "5 (CNAME)");
    assert_eq!(qry_type_label(28), "28 (AAAA)");
    assert_eq!(qry_type_label(99), "99");
}

#[test]
fn dns_rows_keep_arrival_order() {
    let mut plugin = DnsPlugin::new();
    plugin.update(&dns("b.com", "28")).expect("update");
    plugin.update(&dns("a.com", "99")).expect("update");
    plugin.update(&ip(A, B, 60)).expect("non-dns record");

    let summary = plugin.finalize().expect("finalize");
    let names: Vec<_> = summary
        .dns_packets
        .iter()
        .map(|r| r.qry_name.as_deref())
        .collect();
    assert_eq!(names, vec![Some("b.com"), Some("a.com")]);
    assert_eq!(summary.dns_packets[0].qry_type.as_deref(), Some("28 (AAAA)"));
    assert_eq!(summary.dns_packets[1].qry_type.as_deref(), Some("99"));
    assert_eq!(
        summary.dns_packets[0].time.as_deref(),
        Some("1970-01-01T00:00:00.000000")
    );
}

#[test]
fn dns_resolved_names_need_an_address() {
    let mut plugin = DnsPlugin::new();
    plugin
        .update(&dns("x.com", "1").with("dns.resp_name", "x.com"))
        .expect("update");
    plugin
        .update(
            &dns("y.com", "1")
                .with("dns.resp_name", "y.com")
                .with("dns.a", "1.1.1.1"),
        )
        .expect("update");
    plugin
        .update(
            &dns("y.com", "28")
                .with("dns.resp_name", "y.com")
                .with("dns.aaaa", "::1"),
        )
        .expect("update");
    plugin
        .update(
            &dns("y.com", "1")
                .with("dns.resp_name", "y.com")
                .with("dns.a", "1.1.1.1"),
        )
        .expect("update");

    let summary = plugin.finalize().expect("finalize");
    assert!(!summary.ips.contains_key("x.com"));
    let y = summary.ips.get("y.com").expect("y.com resolved");
    assert_eq!(y.a, vec!["1.1.1.1".to_string()]);
    assert_eq!(y.aaaa, vec!["::1".to_string()]);
    assert_eq!(summary.dns_packets.len(), 4);
}

#[test]
fn dns_malformed_type_leaves_state_untouched() {
    let mut plugin = DnsPlugin::new();
    let bad = dns("x.com", "A").with("dns.resp_name", "x.com").with("dns.a", "1.2.3.4");
    assert!(plugin.update(&bad).is_err());
    let summary = plugin.finalize().expect("finalize");
    assert!(summary.dns_packets.is_empty());
    assert!(summary.ips.is_empty());
}

#[test]
fn http_aggregates_per_url() {
    let mut plugin = HttpPlugin::new();
    plugin.update(&http("http://x.com/", "GET")).expect("update");
    plugin.update(&http("http://x.com/", "GET")).expect("update");
    plugin.update(&http("http://x.com/", "POST")).expect("update");
    plugin.update(&http("http://y.com/a", "GET")).expect("update");
    // 没有完整 URL 的记录（例如响应）不计入
    plugin
        .update(&FieldRecord::new().with("http.response_code", "200"))
        .expect("update");

    let summary = plugin.finalize().expect("finalize");
    assert_eq!(summary.http_requests.len(), 4);
    assert_eq!(summary.http_method_summary.get("GET"), Some(&3));
    assert_eq!(summary.http_method_summary.get("POST"), Some(&1));

    let x = summary.http_requests_by_path.get("http://x.com/").expect("x");
    assert_eq!(x.count, 3);
    assert_eq!(x.methods, vec!["GET".to_string(), "POST".to_string()]);
    let y = summary.http_requests_by_path.get("http://y.com/a").expect("y");
    assert_eq!(y.count, 1);
}

#[test]
fn http_referer_is_optional() {
    let mut plugin = HttpPlugin::new();
    plugin
        .update(&http("http://x.com/", "GET").with("http.referer", "http://z.com/"))
        .expect("update");
    plugin.update(&http("http://x.com/b", "GET")).expect("update");
    let summary = plugin.finalize().expect("finalize");
    assert_eq!(summary.http_requests[0].referer.as_deref(), Some("http://z.com/"));
    assert_eq!(summary.http_requests[1].referer, None);
}

#[test]
fn label_counters_read_their_own_field() {
    let records = [
        ip(A, B, 1).with("highest_layer", "DNS"),
        ip(A, B, 1).with("highest_layer", "DNS"),
        ip(A, B, 1).with("highest_layer", "JSON"),
        FieldRecord::new().with("layers.1", "arp"),
    ];

    let mut highest = LabelCounter::highest_layer();
    let mut network = LabelCounter::network_layer();
    for r in &records {
        highest.update(r).expect("update");
        network.update(r).expect("update");
    }

    let highest = highest.finalize().expect("finalize");
    assert_eq!(highest.counts.get("DNS"), Some(&2));
    assert_eq!(highest.counts.get("JSON"), Some(&1));
    assert_eq!(highest.counts.len(), 2);

    let network = network.finalize().expect("finalize");
    assert_eq!(network.counts.get("ip"), Some(&3));
    assert_eq!(network.counts.get("arp"), Some(&1));
}

#[test]
fn summary_reports_first_and_last_record() {
    let mut plugin = SummaryPlugin::new("capture.pcap");
    plugin
        .update(
            &FieldRecord::new()
                .with("frame_info.time_epoch", "1.5")
                .with("frame_info.time_relative", "0.0"),
        )
        .expect("update");
    plugin
        .update(&FieldRecord::new().with("frame_info.time_relative", "0.5"))
        .expect("update");
    plugin
        .update(
            &FieldRecord::new()
                .with("frame_info.time_epoch", "9.0")
                .with("frame_info.time_relative", "12.3456"),
        )
        .expect("update");

    let summary = plugin.finalize().expect("finalize");
    assert_eq!(summary.file_name, "capture.pcap");
    assert_eq!(summary.number_of_packets, 3);
    assert_eq!(summary.start_time.as_deref(), Some("1970-01-01T00:00:01.500000"));
    assert_eq!(summary.time_of_capture, Some(12.35));
}

#[test]
fn summary_without_records_is_an_error() {
    let mut plugin = SummaryPlugin::new("empty.pcap");
    assert!(matches!(
        plugin.finalize(),
        Err(PluginError::EmptyCapture { .. })
    ));
}

#[test]
fn render_escapes_record_values() {
    let mut plugin = HttpPlugin::new();
    plugin
        .update(&http("http://x.com/?q=<script>", "GET"))
        .expect("update");
    let html = HttpPlugin::render(&plugin.finalize().expect("finalize"));
    assert!(html.contains("http://x.com/?q=&lt;script&gt;"));
    assert!(!html.contains("q=<script>"));
}

#[test]
fn record_time_rounds_to_whole_microseconds() {
    let at = |epoch: &str| {
        record_time(&FieldRecord::new().with("frame_info.time_epoch", epoch)).expect("time")
    };
    assert_eq!(at("1600000001.234").as_deref(), Some("2020-09-13T12:26:41.234000"));
    assert_eq!(at("1600000000.1").as_deref(), Some("2020-09-13T12:26:40.100000"));
    assert_eq!(at("1600000000.000001").as_deref(), Some("2020-09-13T12:26:40.000001"));
}

#[test]
fn summary_failed_update_changes_nothing() {
    let mut plugin = SummaryPlugin::new("capture.pcap");
    let bad_relative = FieldRecord::new()
        .with("frame_info.time_epoch", "10.0")
        .with("frame_info.time_relative", "oops");
    assert!(matches!(
        plugin.update(&bad_relative),
        Err(PluginError::MalformedField { field: "frame_info.time_relative", .. })
    ));
    let bad_epoch = FieldRecord::new()
        .with("frame_info.time_epoch", "soon")
        .with("frame_info.time_relative", "0.0");
    assert!(plugin.update(&bad_epoch).is_err());

    plugin
        .update(
            &FieldRecord::new()
                .with("frame_info.time_epoch", "20.0")
                .with("frame_info.time_relative", "0.0"),
        )
        .expect("update");
    plugin
        .update(
            &FieldRecord::new()
                .with("frame_info.time_epoch", "21.0")
                .with("frame_info.time_relative", "1.0"),
        )
        .expect("update");
    plugin
        .update(&FieldRecord::new().with("frame_info.time_relative", "late"))
        .expect_err("malformed relative time");

    let summary = plugin.finalize().expect("finalize");
    assert_eq!(summary.number_of_packets, 2);
    assert_eq!(summary.start_time.as_deref(), Some("1970-01-01T00:00:20.000000"));
    assert_eq!(summary.time_of_capture, Some(1.0));
}
