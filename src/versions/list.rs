use crate::{
    types::version::VersionRecord,
    utils::logger::{LogLevel, Logger},
    versions::merge::merge_addons,
};

/// One trace line per merged add-on, in id order.
pub fn addon_lines(version: &VersionRecord) -> Vec<String> {
    merge_addons(&version.builtins, &version.updates)
        .into_iter()
        .map(|(id, row)| {
            format!(
                "{}  builtin {}  update {}",
                id,
                row.builtin.as_deref().unwrap_or("-"),
                row.update.as_deref().unwrap_or("-")
            )
        })
        .collect()
}

/// Prints every version with its merged add-ons.
pub fn list_versions(versions: &[VersionRecord]) {
    let logger = Logger::new();

    if versions.is_empty() {
        logger.log_message(LogLevel::Warning, "No versions found");
        return;
    }

    for version in versions {
        let release = &version.release;
        let header = format!(
            "{}  [{}, {}, build {}]",
            version.title(),
            release.channel,
            release.lang,
            release.build_id
        );
        let lines = addon_lines(version);
        if lines.is_empty() {
            logger.log_message_with_trace(LogLevel::Info, &header, vec!["no system add-ons"]);
        } else {
            let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
            logger.log_message_with_trace(LogLevel::Info, &header, refs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::version::AddonEntry;

    #[test]
    fn lines_mark_missing_versions() {
        let version = VersionRecord {
            builtins: vec![AddonEntry {
                id: "b".into(),
                version: "1.0".into(),
            }],
            updates: vec![AddonEntry {
                id: "a".into(),
                version: "2.0".into(),
            }],
            ..Default::default()
        };

        assert_eq!(
            addon_lines(&version),
            vec![
                "a  builtin -  update 2.0".to_string(),
                "b  builtin 1.0  update -".to_string(),
            ]
        );
    }
}
