use super::{
    config_engine::{LOCAL_STORAGE_DIR, SAVE_STATE_FILENAME_RAYMARCH_CONFIG},
    raymarch_config::RaymarchConfig,
};
use crate::{
    config::{ENV, PRECURSOR_BYTES, PRECURSOR_BYTE_COUNT},
    helper::more_errors::IoError,
};
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

// ~~ Public ~~

/// [`ENV::STORAGE_DIR`] if set, otherwise [`LOCAL_STORAGE_DIR`] relative to the working directory.
pub fn storage_dir() -> PathBuf {
    env::var_os(ENV::STORAGE_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(LOCAL_STORAGE_DIR))
}

pub fn save_raymarch_config(dir: &Path, config: &RaymarchConfig) -> Result<(), IoError> {
    save_state(dir, config, SAVE_STATE_FILENAME_RAYMARCH_CONFIG)
}

/// Loaded values have not been clamped. Apply them with [`RaymarchConfig::apply`].
pub fn load_raymarch_config(dir: &Path) -> Result<RaymarchConfig, IoError> {
    load_state::<RaymarchConfig>(dir, SAVE_STATE_FILENAME_RAYMARCH_CONFIG)
}

// ~~ Private ~~

fn save_state(dir: &Path, to_serialize: &impl Serialize, file_name: &str) -> Result<(), IoError> {
    let encoded_bytes = bincode::serialize(to_serialize).map_err(IoError::SerializeFailed)?;
    save_state_bytes(dir, file_name, encoded_bytes)
}

fn save_state_bytes(
    dir: &Path,
    file_name: &str,
    mut encoded_bytes: Vec<u8>,
) -> Result<(), IoError> {
    // prepend encoded bytes with engine info
    let mut write_bytes = PRECURSOR_BYTES.to_vec();
    write_bytes.append(&mut encoded_bytes);

    let file_path = validated_file_path(dir, file_name)?;
    fs::write(&file_path, write_bytes)
        .map_err(|e| IoError::WriteFileFailed(file_path.display().to_string(), e))?;
    debug!("saved {}", file_path.display());
    Ok(())
}

fn load_state<T>(dir: &Path, file_name: &str) -> Result<T, IoError>
where
    T: DeserializeOwned,
{
    let encoded_bytes = load_state_bytes(dir, file_name)?;
    bincode::deserialize::<T>(&encoded_bytes).map_err(IoError::DeserializeFailed)
}

fn load_state_bytes(dir: &Path, file_name: &str) -> Result<Vec<u8>, IoError> {
    let file_path = dir.join(file_name);
    let file_path_string = file_path.display().to_string();

    let mut read_bytes =
        fs::read(&file_path).map_err(|e| IoError::read_file_error(e, file_path_string.clone()))?;

    if read_bytes.len() < PRECURSOR_BYTE_COUNT {
        return Err(IoError::MissingHeader {
            file_path: file_path_string,
            len: read_bytes.len(),
        });
    }
    let read_precursor_bytes: Vec<u8> = read_bytes.drain(0..PRECURSOR_BYTE_COUNT).collect();
    if read_precursor_bytes != PRECURSOR_BYTES {
        // version differences are tolerated as long as the payload still deserializes
        warn!(
            "save file {} header {:?} differs from {:?}",
            file_path_string, read_precursor_bytes, PRECURSOR_BYTES
        );
    }
    Ok(read_bytes)
}

/// Ensures containing directories exist, but not the actual file
fn validated_file_path(dir: &Path, file_name: &str) -> Result<PathBuf, IoError> {
    fs::create_dir_all(dir)
        .map_err(|e| IoError::CreateDirectoryFailed(dir.display().to_string(), e))?;
    Ok(dir.join(file_name))
}

// ~~ Tests ~~

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(name: &str) -> PathBuf {
        env::temp_dir().join(format!("sdf_scene_packer_{}_{}", name, std::process::id()))
    }

    #[test]
    fn raymarch_config_save_and_load() {
        let dir = test_dir("round_trip");
        let mut saved_config = RaymarchConfig::default();
        saved_config.set_max_steps(256);
        saved_config.set_smooth_blend(0.8);

        save_raymarch_config(&dir, &saved_config).unwrap();
        let loaded_config = load_raymarch_config(&dir).unwrap();
        assert_eq!(saved_config, loaded_config);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = test_dir("missing");
        assert!(matches!(
            load_raymarch_config(&dir),
            Err(IoError::FileNotFound(_))
        ));
    }

    #[test]
    fn truncated_file_is_reported() {
        let dir = test_dir("truncated");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SAVE_STATE_FILENAME_RAYMARCH_CONFIG), [b'S', b'D']).unwrap();
        assert!(matches!(
            load_raymarch_config(&dir),
            Err(IoError::MissingHeader { len: 2, .. })
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
