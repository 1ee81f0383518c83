use log::LevelFilter;

pub const ENGINE_NAME: &str = "SDF Scene Packer";
pub const ENGINE_VERSION_MAJOR: u8 = 0;
pub const ENGINE_VERSION_MINOR: u8 = 1;

/// Environment variables that can be used to configure the engine
#[allow(non_snake_case)]
pub mod ENV {
    /// Set to a log level name (e.g. "warn", "trace") to override [`super::DEFAULT_LOG_LEVEL`]
    pub const LOG_LEVEL: &str = "SDF_LOG_LEVEL";
    /// Set to an integer to override the default raymarch step budget
    pub const MAX_STEPS: &str = "SDF_MAX_STEPS";
    /// Set to a float to override the default max ray distance
    pub const MAX_DISTANCE: &str = "SDF_MAX_DISTANCE";
    /// Set to a float to override the default surface distance threshold
    pub const SURFACE_DISTANCE: &str = "SDF_SURFACE_DISTANCE";
    /// Set to a float to override the default global smooth blend factor
    pub const SMOOTH_BLEND: &str = "SDF_SMOOTH_BLEND";
    /// Directory where raymarch settings are saved. Defaults to
    /// [`crate::engine::config_engine::LOCAL_STORAGE_DIR`]
    pub const STORAGE_DIR: &str = "SDF_STORAGE_DIR";
}

/// Log level filter. Log messages with lower levels than this will not be displayed.
#[cfg(debug_assertions)]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
#[cfg(not(debug_assertions))]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Bytes written at the start of every save file: magic then version.
pub const PRECURSOR_BYTES: [u8; 6] = [
    b'S',
    b'D',
    b'F',
    b'P',
    ENGINE_VERSION_MAJOR,
    ENGINE_VERSION_MINOR,
];
pub const PRECURSOR_BYTE_COUNT: usize = PRECURSOR_BYTES.len();

/// Reads [`ENV::LOG_LEVEL`], falling back to [`DEFAULT_LOG_LEVEL`] when unset or unparsable.
pub fn log_level() -> LevelFilter {
    std::env::var(ENV::LOG_LEVEL)
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}
