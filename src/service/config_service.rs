use std::io;
use std::path::PathBuf;

use crate::config::config::{absolutize, INPUT_EXTENSION, OUTPUT_EXTENSION};
use crate::config::ports::{AppConfig, ConfigPort};
use crate::models::transcode::EncodingSettings;

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器
pub struct DefaultConfigAdapter {
    source: PathBuf,
    destination: PathBuf,
}

impl DefaultConfigAdapter {
    pub fn new(source: PathBuf, destination: PathBuf) -> Self {
        DefaultConfigAdapter {
            source,
            destination,
        }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        Ok(AppConfig {
            source: absolutize(&self.source)?,
            destination: absolutize(&self.destination)?,
            input_extension: INPUT_EXTENSION.to_string(),
            output_extension: OUTPUT_EXTENSION.to_string(),
            encoding: EncodingSettings::default(),
            no_progress: false,
            fail_on_error: false,
        })
    }
}
