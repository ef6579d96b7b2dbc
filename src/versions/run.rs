use crate::{
    types::version::VersionRecord,
    utils::{
        api::resolve_kinto_base_url,
        logger::{LogLevel, Logger},
        spinner::run_step,
    },
    versions::{
        fetch::{fetch_versions, load_versions_file},
        list::list_versions,
        render::{DEFAULT_PAGE, render},
    },
};
use std::path::{Path, PathBuf};

/// Where version records come from.
#[derive(Debug, Clone)]
pub enum VersionSource {
    Server(String),
    File(PathBuf),
}

impl VersionSource {
    pub fn from_args(server: Option<&str>, input: Option<PathBuf>) -> Self {
        match input {
            Some(path) => VersionSource::File(path),
            None => VersionSource::Server(resolve_kinto_base_url(server)),
        }
    }

    pub async fn load(&self) -> Result<Vec<VersionRecord>, String> {
        match self {
            VersionSource::Server(base) => {
                run_step(
                    &format!("Fetching versions from {}", base),
                    |versions: &Vec<VersionRecord>| format!("Fetched {} versions", versions.len()),
                    fetch_versions(base),
                )
                .await
            }
            VersionSource::File(path) => load_versions_file(path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub source: VersionSource,
    pub template: Option<PathBuf>,
    pub output: PathBuf,
    pub mount: String,
}

fn read_page(template: Option<&Path>) -> Result<String, String> {
    match template {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read template {}: {}", path.display(), e)),
        None => Ok(DEFAULT_PAGE.to_string()),
    }
}

/// Loads the versions, renders them into the host page and writes the result.
pub async fn render_page(options: &RenderOptions) -> Result<(), String> {
    let page = read_page(options.template.as_deref())?;
    let versions = options.source.load().await?;

    let html = render(&page, &options.mount, &versions)?;

    if let Some(parent) = options.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                format!("Failed to create directory {}: {}", parent.display(), e)
            })?;
        }
    }
    std::fs::write(&options.output, html)
        .map_err(|e| format!("Failed to write {}: {}", options.output.display(), e))?;

    Logger::new().log_message(
        LogLevel::Success,
        &format!(
            "Rendered {} versions into {}",
            versions.len(),
            options.output.display()
        ),
    );

    Ok(())
}

pub async fn print_versions(source: &VersionSource) -> Result<(), String> {
    let versions = source.load().await?;
    list_versions(&versions);
    Ok(())
}
