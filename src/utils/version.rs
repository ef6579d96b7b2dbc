/// Returns the CLI version: `SYSTEMADDONS_CLI_VERSION` when set, otherwise
/// the version the binary was built with.
pub fn get_version() -> String {
    if let Ok(v) = std::env::var("SYSTEMADDONS_CLI_VERSION") {
        if !v.trim().is_empty() {
            return v;
        }
    }

    env!("CARGO_PKG_VERSION").to_string()
}
