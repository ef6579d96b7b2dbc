use crate::types::version::AddonEntry;
use std::collections::BTreeMap;

/// One add-on as shown on the page: the version built into the release
/// and the version offered as an update, when either exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedAddonRow {
    pub builtin: Option<String>,
    pub update: Option<String>,
}

/// Merges both system add-on lists into one table keyed by add-on id.
///
/// Iterating the returned map yields ids in ascending order.
pub fn merge_addons(
    builtins: &[AddonEntry],
    updates: &[AddonEntry],
) -> BTreeMap<String, MergedAddonRow> {
    let mut rows: BTreeMap<String, MergedAddonRow> = BTreeMap::new();

    for addon in builtins {
        rows.entry(addon.id.clone()).or_default().builtin = Some(addon.version.clone());
    }

    for addon in updates {
        rows.entry(addon.id.clone()).or_default().update = Some(addon.version.clone());
    }

    rows
}
