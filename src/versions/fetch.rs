use crate::{
    types::version::{RecordsResponse, VersionRecord},
    utils::api::versions_records_url,
};
use std::path::Path;

const USER_AGENT: &str = concat!("systemaddons-versions/", env!("CARGO_PKG_VERSION"));

/// Parses a records response body and returns its `data` list.
pub fn parse_records(body: &str) -> Result<Vec<VersionRecord>, String> {
    let response: RecordsResponse = serde_json::from_str(body)
        .map_err(|e| format!("Failed to parse versions records: {}", e))?;
    Ok(response.data)
}

/// Fetches every version record from the Kinto server at `base_url`,
/// sorted by release version on the server side.
pub async fn fetch_versions(base_url: &str) -> Result<Vec<VersionRecord>, String> {
    fetch_versions_with(&reqwest::Client::new(), base_url).await
}

pub async fn fetch_versions_with(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<VersionRecord>, String> {
    let api_url = versions_records_url(base_url);

    let response = match client
        .get(&api_url)
        .header(reqwest::header::ACCEPT, "application/json")
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            return Err(format!("Failed to send request to {}: {}", api_url, e));
        }
    };

    if !response.status().is_success() {
        let status = response.status();
        let error_text = match response.text().await {
            Ok(text) => text,
            Err(_) => "No additional error information".to_string(),
        };
        return Err(format!(
            "Failed to fetch versions. Status: {}, Error: {}",
            status, error_text
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response body: {}", e))?;

    parse_records(&body)
}

/// Reads version records from a saved records response.
pub fn load_versions_file(path: &Path) -> Result<Vec<VersionRecord>, String> {
    let body = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    parse_records(&body)
}
