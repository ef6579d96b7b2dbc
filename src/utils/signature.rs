pub fn get_signature(version: &str) -> String {
    format!(
        r#"
   _____           ___      __    __
  / ___/__ _____  / _ | ___/ /___/ /__  ___  ___     🧩 systemaddons-versions
 _\ \/ // (_-</ _/ __ |/ _  / _  / _ \/ _ \(_-<
/___/\_, /___/\__/_/ |_|\_,_/\_,_/\___/_//_/___/     Firefox system add-ons, per release.
    /___/
                                                     v{}
"#,
        version
    )
}
