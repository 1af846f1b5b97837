//! Sound source management.
//!
//! A completion sound is either a macOS system sound, a user-selected file,
//! or a generated tone used when nothing else is available.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A system sound from `/System/Library/Sounds/` or similar.
    System {
        /// The name of the sound (e.g., "Glass").
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
    /// A sound file chosen by the user.
    File {
        /// Path as entered in settings.
        path: PathBuf,
    },
    /// A short generated sine tone.
    Tone {
        /// Display name of the tone.
        name: String,
    },
}

impl SoundSource {
    /// Creates a new system sound source.
    #[must_use]
    pub fn system(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::System {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates a source for a user-selected file.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Creates a generated tone source.
    #[must_use]
    pub fn tone(name: impl Into<String>) -> Self {
        Self::Tone { name: name.into() }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::System { name, .. } | Self::Tone { name } => name.clone(),
            Self::File { path } => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    /// Returns the file path, if the source is backed by a file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::System { path, .. } | Self::File { path } => Some(path),
            Self::Tone { .. } => None,
        }
    }

    /// Returns true if this is a system sound.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System { .. })
    }

    /// Returns true if this is a generated tone.
    #[must_use]
    pub fn is_tone(&self) -> bool {
        matches!(self, Self::Tone { .. })
    }
}

/// Directories to search for system sounds, in order of priority.
const SYSTEM_SOUND_DIRS: &[&str] = &["/System/Library/Sounds", "/Library/Sounds"];

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["aiff", "wav", "mp3", "m4a", "flac"];

/// Alert sound names to try, in order of preference.
const ALERT_SOUND_NAMES: &[&str] = &["Funk", "Glass", "Ping", "Pop"];

/// Discovers available system sounds.
///
/// Returns an empty vector if no sound directory exists.
#[must_use]
pub fn discover_system_sounds() -> Vec<SoundSource> {
    let mut sounds = Vec::new();

    for dir in SYSTEM_SOUND_DIRS {
        let Ok(entries) = std::fs::read_dir(dir) else {
            continue;
        };

        for entry in entries.flatten() {
            let file_path = entry.path();
            let supported = file_path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
            if !supported {
                continue;
            }
            if let Some(stem) = file_path.file_stem() {
                sounds.push(SoundSource::System {
                    name: stem.to_string_lossy().into_owned(),
                    path: file_path,
                });
            }
        }
    }

    sounds.sort_by_key(SoundSource::name);
    sounds
}

/// Gets the sound used for the system beep.
///
/// Prefers a known alert sound, then any system sound, and finally the
/// generated tone.
#[must_use]
pub fn get_alert_sound() -> SoundSource {
    let system_sounds = discover_system_sounds();

    for preferred in ALERT_SOUND_NAMES {
        if let Some(sound) = system_sounds.iter().find(|s| s.name() == *preferred) {
            return sound.clone();
        }
    }

    system_sounds
        .into_iter()
        .next()
        .unwrap_or_else(|| SoundSource::tone("beep"))
}

/// Finds a system sound by name.
///
/// # Errors
///
/// Returns `SoundError::FileNotFound` if no sound with the given name exists.
pub fn find_system_sound(name: &str) -> Result<SoundSource, SoundError> {
    discover_system_sounds()
        .into_iter()
        .find(|s| s.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| SoundError::FileNotFound(format!("system sound '{}' not found", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_source_system() {
        let source = SoundSource::system("Glass", "/System/Library/Sounds/Glass.aiff");
        assert!(source.is_system());
        assert!(!source.is_tone());
        assert_eq!(source.name(), "Glass");
        assert!(source.path().is_some());
    }

    #[test]
    fn test_sound_source_file_name_from_stem() {
        let source = SoundSource::file("/Users/me/Music/gong.mp3");
        assert_eq!(source.name(), "gong");
        assert_eq!(source.path(), Some(Path::new("/Users/me/Music/gong.mp3")));
    }

    #[test]
    fn test_sound_source_tone() {
        let source = SoundSource::tone("beep");
        assert!(source.is_tone());
        assert_eq!(source.name(), "beep");
        assert!(source.path().is_none());
    }

    #[test]
    fn test_discover_system_sounds_no_panic() {
        // Container environments have no sound directories
        let sounds = discover_system_sounds();
        assert!(sounds.iter().all(SoundSource::is_system));
    }

    #[test]
    fn test_get_alert_sound_returns_source() {
        let source = get_alert_sound();
        assert!(!source.name().is_empty());
    }

    #[test]
    fn test_find_system_sound_not_found() {
        match find_system_sound("NonExistentSound12345") {
            Err(SoundError::FileNotFound(msg)) => assert!(msg.contains("NonExistentSound12345")),
            other => panic!("Expected FileNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_supported_extensions() {
        assert!(SUPPORTED_EXTENSIONS.contains(&"aiff"));
        assert!(SUPPORTED_EXTENSIONS.contains(&"wav"));
        assert!(SUPPORTED_EXTENSIONS.contains(&"mp3"));
    }
}
