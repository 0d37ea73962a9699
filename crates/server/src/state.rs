use pixshift_core::{Config, ImageConverter};

/// Shared application state
pub struct AppState {
    config: Config,
    converter: ImageConverter,
}

impl AppState {
    pub fn new(config: Config, converter: ImageConverter) -> Self {
        Self { config, converter }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn converter(&self) -> &ImageConverter {
        &self.converter
    }
}
