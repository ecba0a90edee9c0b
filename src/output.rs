use chrono::{Local, TimeZone};
use serde::Serialize;

/// Re-indent a JSON document with two spaces
///
/// Key order, number digits and trailing whitespace are kept as received. Exponents
/// are written as `e+N`/`e-N`.
pub fn indent_json(body: &[u8]) -> serde_json::Result<String> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    let mut text = serde_json::to_string_pretty(&value)?;
    let end = body
        .iter()
        .rposition(|b| !matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        .map_or(0, |i| i + 1);
    text.push_str(&String::from_utf8_lossy(&body[end..]));
    Ok(text)
}

/// Body as printed: verbatim, or re-indented when `pretty` is set
pub fn render(body: &[u8], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        indent_json(body)
    } else {
        Ok(String::from_utf8_lossy(body).into_owned())
    }
}

/// Serialize a value compactly
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

/// Format WireCloud's epoch-millisecond timestamps as `YYYY/MM/DD HH:MM:SS` local time
pub fn format_millis(millis: i64) -> String {
    match Local.timestamp_opt(millis / 1000, 0).single() {
        Some(t) => t.format("%Y/%m/%d %H:%M:%S").to_string(),
        None => millis.to_string(),
    }
}
