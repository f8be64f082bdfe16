use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub storage_dir: PathBuf,
    pub storage_prefix: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let data_path = env::var("STORE_DATA_PATH")
            .unwrap_or_else(|_| "assets/data.json".to_string())
            .into();
        let storage_dir = env::var("STORE_STORAGE_DIR")
            .unwrap_or_else(|_| ".violetstore".to_string())
            .into();
        let storage_prefix =
            env::var("STORE_STORAGE_PREFIX").unwrap_or_else(|_| "violetstore_".to_string());
        Ok(Self {
            data_path,
            storage_dir,
            storage_prefix,
        })
    }
}
