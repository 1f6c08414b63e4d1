use std::{fs, sync::LazyLock};

use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigError, File};

/// The endpoint baked into the default config artifact. Used directly whenever
/// the server config file cannot be loaded.
pub const DEFAULT_DATA_ENDPOINT: &str = "http://localhost:5000/get-data";

/// Errors that can occur while loading the server configuration file.
#[derive(thiserror::Error, Debug)]
pub enum ServerConfigError {
    /// The config file could not be created or read.
    #[error("Error reading or writing server config file at {path}: {source}")]
    Io { path: Utf8PathBuf, #[source] source: std::io::Error },
    /// The config file exists but could not be parsed, or is missing the
    /// data_endpoint setting.
    #[error("Error parsing server config: {source}")]
    Parse { #[from] source: ConfigError },
}

/// Gets the URL of the endpoint the application fetches display data from.
///
/// This function reads the `data_endpoint` setting from the server config file
/// in the application data directory, creating the file with default values if
/// it doesn't already exist. If the file cannot be loaded or parsed, a warning
/// is logged and the built-in default endpoint is returned instead.
///
/// # Returns
///
/// The configured endpoint URL, or [`DEFAULT_DATA_ENDPOINT`] if the config
/// file could not be loaded.
///
/// # Panics
///
/// Panics if the application data directory cannot be determined or created.
pub fn data_endpoint() -> String {
    data_endpoint_from(get_app_folder())
}

fn data_endpoint_from(folder: &Utf8Path) -> String {
    match load_data_endpoint(folder) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            log::warn!("Failed to load server config: {}. Using default endpoint.", e);
            DEFAULT_DATA_ENDPOINT.to_string()
        }
    }
}

fn load_data_endpoint(folder: &Utf8Path) -> Result<String, ServerConfigError> {
    let server_config = load_server_config(folder)?;

    Ok(server_config.get_string("data_endpoint")?)
}

fn load_server_config(folder: &Utf8Path) -> Result<Config, ServerConfigError> {
    let config_file_path = folder.join("server.toml");
    let file_exists = fs::exists(&config_file_path)
        .map_err(|e| ServerConfigError::Io { path: config_file_path.clone(), source: e })?;
    if !file_exists {
        // If the server.toml file does not exist, create it with default values
        fs::write(&config_file_path, DEFAULT_SERVER_CONFIG_BYTES)
            .map_err(|e| ServerConfigError::Io { path: config_file_path.clone(), source: e })?;
    }

    Ok(Config::builder()
        .add_source(File::with_name(config_file_path.as_str()))
        .build()?)
}

fn get_app_folder() -> &'static Utf8Path {
    let folder: &'static Utf8PathBuf = &APP_FOLDER;
    if !fs::exists(folder).expect("Error while determining if app data directory exists") {
            fs::create_dir_all(folder).expect("Failed to create local data directory");
    }
    folder.as_path()
}

// Private constants and functions
const DEFAULT_SERVER_CONFIG_BYTES: &[u8] = include_bytes!("../artifacts/defaults/server.toml");

static APP_FOLDER: LazyLock<Utf8PathBuf> = LazyLock::new(|| Utf8PathBuf::from_path_buf(dirs::data_local_dir()
            .expect("Failed to get local data directory"))
            .expect("Local data directory is not a valid UTF-8 path")
            .join("postbox"));

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8_folder(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .expect("temp dir is not a valid UTF-8 path")
    }

    #[test]
    fn creates_the_default_config_on_first_load() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let folder = utf8_folder(&dir);

        let endpoint = load_data_endpoint(&folder).expect("failed to load endpoint");

        assert_eq!(endpoint, DEFAULT_DATA_ENDPOINT);
        assert!(folder.join("server.toml").exists());
    }

    #[test]
    fn reads_back_an_overridden_endpoint() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let folder = utf8_folder(&dir);
        fs::write(folder.join("server.toml"), "data_endpoint = \"http://localhost:9999/get-data\"\n")
            .expect("failed to write config");

        let endpoint = load_data_endpoint(&folder).expect("failed to load endpoint");

        assert_eq!(endpoint, "http://localhost:9999/get-data");
    }

    #[test]
    fn falls_back_to_the_default_endpoint_on_an_unparseable_config() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let folder = utf8_folder(&dir);
        fs::write(folder.join("server.toml"), "data_endpoint = [oops\n")
            .expect("failed to write config");

        let endpoint = data_endpoint_from(&folder);

        assert_eq!(endpoint, DEFAULT_DATA_ENDPOINT);
    }

    #[test]
    fn reports_a_parse_error_for_an_unparseable_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let folder = utf8_folder(&dir);
        fs::write(folder.join("server.toml"), "data_endpoint = [oops\n")
            .expect("failed to write config");

        let error = load_data_endpoint(&folder).expect_err("load should fail");

        assert!(matches!(error, ServerConfigError::Parse { .. }));
    }

    #[test]
    fn reports_a_parse_error_when_the_endpoint_setting_is_missing() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let folder = utf8_folder(&dir);
        fs::write(folder.join("server.toml"), "other_setting = true\n")
            .expect("failed to write config");

        let error = load_data_endpoint(&folder).expect_err("load should fail");

        assert!(matches!(error, ServerConfigError::Parse { .. }));
    }
}
