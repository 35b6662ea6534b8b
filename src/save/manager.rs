use super::envelope::SaveEnvelope;
use crate::core::constants::SAVE_FILE_MAGIC;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Magic, length field and trailing checksum.
const FRAME_OVERHEAD: u64 = 8 + 4 + 32;

/// Manages the on-disk save file with a checksummed framing.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a new SaveManager instance
    ///
    /// The save file lives in the platform config directory, resolved with
    /// the `directories` crate.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "autobattle").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("save.dat"),
        })
    }

    /// Uses an explicit file path; the parent directory is created if needed.
    pub fn with_path(save_path: impl Into<PathBuf>) -> io::Result<Self> {
        let save_path = save_path.into();
        if let Some(parent) = save_path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { save_path })
    }

    #[cfg(test)]
    fn new_for_test() -> io::Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "autobattle-test-{}-{}",
            std::process::id(),
            test_id
        ));
        Self::with_path(temp_dir.join("save.dat"))
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    /// Writes the envelope as JSON.
    ///
    /// File format:
    /// - Magic (8 bytes)
    /// - Data length (4 bytes)
    /// - JSON envelope (variable length)
    /// - SHA256 checksum over the three fields above (32 bytes)
    pub fn save(&self, envelope: &SaveEnvelope) -> io::Result<()> {
        let data = envelope
            .to_json()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
            .into_bytes();
        let data_len = u32::try_from(data.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "Save data too large"))?;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_FILE_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_FILE_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        log::debug!("Saved {} bytes to {}", data.len(), self.save_path.display());
        Ok(())
    }

    /// Reads and verifies the framed file, returning the raw JSON text.
    ///
    /// Returns an error if:
    /// - The file doesn't exist
    /// - The magic is incorrect
    /// - The checksum verification fails
    /// - The payload is not UTF-8
    pub fn load_raw(&self) -> io::Result<String> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut magic_bytes = [0u8; 8];
        file.read_exact(&mut magic_bytes)?;
        let magic = u64::from_le_bytes(magic_bytes);
        if magic != SAVE_FILE_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save magic: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_FILE_MAGIC, magic
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);
        let max_len = file.metadata()?.len().saturating_sub(FRAME_OVERHEAD);
        if data_len as u64 > max_len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Save length {} exceeds file size", data_len),
            ));
        }

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(magic_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();

        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        String::from_utf8(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Raw save text for the restore codec, or `None` when there is no
    /// usable file. Corruption is logged, not returned.
    pub fn read_for_restore(&self) -> Option<String> {
        match self.load_raw() {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Ignoring unreadable save {}: {}", self.save_path.display(), e);
                None
            }
        }
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    pub fn delete(&self) -> io::Result<()> {
        match fs::remove_file(&self.save_path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Catalog;
    use crate::core::game_state::GameState;
    use crate::save::envelope::build_save_envelope;

    fn envelope() -> SaveEnvelope {
        let mut state = GameState::new(&Catalog::builtin(), 0);
        state.gold = 321;
        build_save_envelope(&state, 99)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let manager = SaveManager::new_for_test().unwrap();
        let envelope = envelope();
        manager.save(&envelope).unwrap();
        assert!(manager.save_exists());

        let raw = manager.load_raw().unwrap();
        assert_eq!(raw, envelope.to_json().unwrap());
        manager.delete().unwrap();
        assert!(!manager.save_exists());
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let manager = SaveManager::new_for_test().unwrap();
        assert!(manager.read_for_restore().is_none());
        manager.delete().unwrap();
    }

    #[test]
    fn test_corrupted_payload_fails_checksum() {
        let manager = SaveManager::new_for_test().unwrap();
        manager.save(&envelope()).unwrap();

        let mut bytes = fs::read(manager.path()).unwrap();
        bytes[14] ^= 0xFF;
        fs::write(manager.path(), &bytes).unwrap();

        let err = manager.load_raw().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(manager.read_for_restore().is_none());
    }

    #[test]
    fn test_oversized_length_field_rejected() {
        let manager = SaveManager::new_for_test().unwrap();
        let mut bytes = SAVE_FILE_MAGIC.to_le_bytes().to_vec();
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        bytes.extend_from_slice(b"{}");
        fs::write(manager.path(), &bytes).unwrap();

        let err = manager.load_raw().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("exceeds file size"));
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let manager = SaveManager::new_for_test().unwrap();
        fs::write(manager.path(), b"definitely not a save file at all").unwrap();
        assert!(manager.load_raw().is_err());
    }
}
