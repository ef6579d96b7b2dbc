pub const DEFAULT_KINTO_URL: &str = "https://kinto-ota.dev.mozaws.net/v1";

pub fn get_kinto_base_url() -> String {
    std::env::var("SYSTEMADDONS_KINTO_URL").unwrap_or_else(|_| DEFAULT_KINTO_URL.to_string())
}

/// Picks the server from an explicit flag, then the environment, then the default.
pub fn resolve_kinto_base_url(flag: Option<&str>) -> String {
    let base = match flag {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => get_kinto_base_url(),
    };
    base.trim_end_matches('/').to_string()
}

pub fn versions_records_url(base: &str) -> String {
    format!(
        "{}/buckets/systemaddons/collections/versions/records?_sort=release.version",
        base.trim_end_matches('/')
    )
}
