use crate::{
    types::version::VersionRecord,
    utils::html::{append_html, replace_children_by_id, set_text_content, template_content},
    versions::merge::merge_addons,
};

/// Host page shipped with the binary, used when no `--template` is given.
pub const DEFAULT_PAGE: &str = include_str!("../../assets/index.html");

pub const DEFAULT_MOUNT_ID: &str = "main";

const VERSION_TEMPLATE_ID: &str = "version-info-tpl";
const ADDON_ROW_TEMPLATE_ID: &str = "addon-row-tpl";

/// The two templates cloned for each rendered version.
#[derive(Debug, Clone)]
pub struct PageTemplates {
    version_block: String,
    addon_row: String,
}

impl PageTemplates {
    pub fn from_page(page: &str) -> Result<Self, String> {
        Ok(PageTemplates {
            version_block: template_content(page, VERSION_TEMPLATE_ID)?,
            addon_row: template_content(page, ADDON_ROW_TEMPLATE_ID)?,
        })
    }

    /// Fills one version block, add-on table included.
    pub fn render_version(&self, version: &VersionRecord) -> Result<String, String> {
        let release = &version.release;
        let title = version.title();
        let mut block = self.version_block.clone();

        for (selector, text) in [
            (".title", title.as_str()),
            (".url dd", release.url.as_str()),
            (".buildId dd", release.build_id.as_str()),
            (".target dd", release.target.as_str()),
            (".lang dd", release.lang.as_str()),
            (".channel dd", release.channel.as_str()),
        ] {
            set_text_content(&mut block, selector, text).map_err(|e| {
                format!("Template '{}' is unusable: {}", VERSION_TEMPLATE_ID, e)
            })?;
        }

        let mut rows = String::new();
        for (id, addon) in merge_addons(&version.builtins, &version.updates) {
            let mut row = self.addon_row.clone();
            for (selector, text) in [
                (".id", id.as_str()),
                (".builtin", addon.builtin.as_deref().unwrap_or("")),
                (".updated", addon.update.as_deref().unwrap_or("")),
            ] {
                set_text_content(&mut row, selector, text).map_err(|e| {
                    format!("Template '{}' is unusable: {}", ADDON_ROW_TEMPLATE_ID, e)
                })?;
            }
            rows.push_str(&row);
        }

        append_html(&mut block, ".addons tbody", &rows)
            .map_err(|e| format!("Template '{}' is unusable: {}", VERSION_TEMPLATE_ID, e))?;

        Ok(block)
    }
}

/// Renders every version into the page's mount point, replacing whatever
/// it held. Blocks keep the order of `versions`.
pub fn render(page: &str, mount_id: &str, versions: &[VersionRecord]) -> Result<String, String> {
    let templates = PageTemplates::from_page(page)?;

    let mut blocks = String::new();
    for version in versions {
        blocks.push_str(&templates.render_version(version)?);
    }

    let mut output = page.to_string();
    replace_children_by_id(&mut output, mount_id, &blocks)
        .map_err(|_| format!("Mount point '#{}' not found in page", mount_id))?;

    Ok(output)
}
