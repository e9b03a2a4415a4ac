//! 常用字段路径

pub const TIME_EPOCH: &str = "frame_info.time_epoch";
pub const TIME_RELATIVE: &str = "frame_info.time_relative";
/// 帧长度（bytes）
pub const FRAME_LEN: &str = "frame_info.len";
pub const HIGHEST_LAYER: &str = "highest_layer";
/// 第 1 层（物理层）不在解码结果里，`layers.1` 通常是网络层
pub const NETWORK_LAYER: &str = "layers.1";

pub const IP: &str = "ip";
pub const IP_SRC: &str = "ip.src_host";
pub const IP_DST: &str = "ip.dst_host";

pub const DNS: &str = "dns";
pub const DNS_QRY_NAME: &str = "dns.qry_name";
pub const DNS_QRY_TYPE: &str = "dns.qry_type";
pub const DNS_A: &str = "dns.a";
pub const DNS_AAAA: &str = "dns.aaaa";
pub const DNS_CNAME: &str = "dns.cname";
pub const DNS_RESP_NAME: &str = "dns.resp_name";

pub const HTTP: &str = "http";
pub const HTTP_FULL_URI: &str = "http.request_full_uri";
pub const HTTP_METHOD: &str = "http.request_method";
pub const HTTP_REFERER: &str = "http.referer";
