//! Acceptヘッダーによるレスポンス形式の判定

use axum::http::{header::ACCEPT, HeaderMap};

const TEXT_HTML: &str = "text/html";

/// Returns true when any `Accept` value lists `text/html` with a non-zero quality.
///
/// Wildcard ranges (`*/*`, `text/*`) do not select HTML: API clients that send
/// them expect JSON.
pub fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .any(is_acceptable_html)
}

fn is_acceptable_html(media_range: &str) -> bool {
    let mut parts = media_range.split(';');
    let media_type = parts.next().unwrap_or_default().trim();
    if !media_type.eq_ignore_ascii_case(TEXT_HTML) {
        return false;
    }
    !parts.any(|param| {
        let Some((name, value)) = param.split_once('=') else {
            return false;
        };
        name.trim().eq_ignore_ascii_case("q")
            && value.trim().parse::<f32>().map(|q| q <= 0.0).unwrap_or(false)
    })
}
