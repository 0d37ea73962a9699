pub mod config;
pub mod convert;
pub mod metrics;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config, ConfigError,
    ConvertConfig, ServerConfig,
};
pub use convert::{
    ArtifactDescriptor, ConversionForm, ConversionResult, ConvertError, FileInput, ImageConverter,
    ItemObserver, ObserverSet, ResponseEnvelope, TargetFormat,
};
