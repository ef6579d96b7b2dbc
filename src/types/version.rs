use serde::{Deserialize, Deserializer};

/// Body returned by the Kinto records endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsResponse {
    pub data: Vec<VersionRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Release {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, rename = "buildId", deserialize_with = "null_as_default")]
    pub build_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lang: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub channel: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddonEntry {
    pub id: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VersionRecord {
    pub release: Release,
    #[serde(default, deserialize_with = "null_as_default")]
    pub builtins: Vec<AddonEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updates: Vec<AddonEntry>,
}

impl VersionRecord {
    pub fn title(&self) -> String {
        format!("Firefox {} {}", self.release.version, self.release.target)
    }
}

// Kinto stores `null` for fields a collector could not fill.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_lists_are_empty() {
        let body = r#"{"data": [
            {"release": {"version": "60.0", "target": "linux-x86_64"}},
            {"release": {"version": "61.0"}, "builtins": null, "updates": null}
        ]}"#;
        let resp: RecordsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.data.len(), 2);
        for record in &resp.data {
            assert!(record.builtins.is_empty());
            assert!(record.updates.is_empty());
        }
        assert_eq!(resp.data[1].release.target, "");
    }

    #[test]
    fn release_fields_follow_record_names() {
        let body = r#"{"release": {"version": "62.0", "target": "win64", "url": "http://x",
            "buildId": "123", "lang": "en-US", "channel": "release", "filename": "f.zip"},
            "builtins": [{"id": "a", "version": "1.0"}]}"#;
        let record: VersionRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.release.build_id, "123");
        assert_eq!(record.title(), "Firefox 62.0 win64");
        assert_eq!(
            record.builtins,
            vec![AddonEntry {
                id: "a".into(),
                version: "1.0".into()
            }]
        );
    }

    #[test]
    fn null_release_fields_are_blank() {
        let body = r#"{"release": {"version": "62.0", "target": "win64", "url": null,
            "buildId": null, "lang": null, "channel": "release"}}"#;
        let record: VersionRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.release.url, "");
        assert_eq!(record.release.build_id, "");
        assert_eq!(record.release.lang, "");
        assert_eq!(record.release.channel, "release");
    }

    #[test]
    fn body_without_data_is_rejected() {
        assert!(serde_json::from_str::<RecordsResponse>(r#"{"errno": 404}"#).is_err());
    }
}
