use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSettings {
    #[serde(default = "StageSettings::default_staging_capacity")]
    pub staging_capacity: u64,
    #[serde(default = "StageSettings::default_model_root")]
    pub model_root: PathBuf,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            staging_capacity: Self::default_staging_capacity(),
            model_root: Self::default_model_root(),
        }
    }
}

impl StageSettings {
    pub fn load() -> Self {
        Self::load_from_path("settings.json")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        use std::fs;

        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<StageSettings>(&contents) {
                Ok(settings) => {
                    info!("Loaded stage settings from {:?}", path);
                    settings.validate()
                }
                Err(err) => {
                    warn!(
                        "Failed to parse {:?} ({}). Falling back to default stage settings.",
                        path, err
                    );
                    StageSettings::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Stage settings file {:?} not found. Using default settings.",
                    path
                );
                StageSettings::default()
            }
            Err(err) => {
                warn!(
                    "Failed to read {:?} ({}). Falling back to default stage settings.",
                    path, err
                );
                StageSettings::default()
            }
        }
    }

    fn validate(mut self) -> Self {
        if self.staging_capacity == 0 {
            warn!("Staging capacity must be greater than zero. Using default value.");
            self.staging_capacity = Self::default_staging_capacity();
        }

        let remainder = self.staging_capacity % wgpu::COPY_BUFFER_ALIGNMENT;
        if remainder != 0 {
            let rounded = self.staging_capacity + (wgpu::COPY_BUFFER_ALIGNMENT - remainder);
            warn!(
                "Staging capacity {} is not a multiple of {}. Rounding up to {}.",
                self.staging_capacity,
                wgpu::COPY_BUFFER_ALIGNMENT,
                rounded
            );
            self.staging_capacity = rounded;
        }

        self
    }

    pub fn model_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.model_root.join(file)
    }

    const fn default_staging_capacity() -> u64 {
        4 * 1024 * 1024
    }

    fn default_model_root() -> PathBuf {
        PathBuf::from("res/models")
    }
}
