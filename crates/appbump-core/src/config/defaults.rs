//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "appbump.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "appbump.yaml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".appbump.yaml";

/// Package manifest name, relative to the project root
pub const MANIFEST_FILE: &str = "package.json";

/// Get list of config file names to search for, in priority order
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ALT_CONFIG_FILE,
        ".appbump.toml",
    ]
}
