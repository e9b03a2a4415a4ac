use crate::record::FieldRecord;

pub const A: &str = "10.0.0.1";
pub const B: &str = "10.0.0.2";

/// 带 IPv4 源/目的地址与帧长度的记录
pub fn ip(src: &str, dst: &str, len: u64) -> FieldRecord {
    FieldRecord::new()
        .with("layers.0", "eth")
        .with("layers.1", "ip")
        .with("ip.src_host", src)
        .with("ip.dst_host", dst)
        .with("frame_info.len", len.to_string())
}
