use std::{
    collections::BTreeMap,
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use render_device::SampleCount;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config_dir;

const SETTINGS_FILE: &str = "save-camera-view.toml";

/// The default template of the capture window.
pub const WINDOW_TEMPLATE: &str = "{scene} {camera} {samples} {date} {time}";

/// The default template of a camera's inspector.
pub const INSPECTOR_TEMPLATE: &str = "{scene} {camera} {date} {time}";

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: CaptureSettings,
    pub cameras: BTreeMap<String, CaptureSettings>,
}

/// The settings of one capture surface.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    /// Empty falls back to the `Renders` directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Empty falls back to the surface's default template.
    pub file_name: String,

    pub samples: MultiSample,
}

/// A sample count stored as `0`, `2`, `4` or `8`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MultiSample(pub SampleCount);

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open settings file:\n{0}")]
    OpenFile(#[source] io::Error),

    #[error("Failed to save settings file:\n{0}")]
    SaveFile(#[from] SaveError),

    #[error("Failed to read settings file:\n{0}")]
    ReadFile(#[source] io::Error),

    #[error("Failed to deserialize settings:\n{0}")]
    Deserialize(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Failed to serialize settings:\n{0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write file:\n{0}")]
    Write(#[from] io::Error),
}

impl Settings {
    /// Loads the settings file, writing the defaults if there is none.
    pub fn load_or_create(path: &Path) -> Result<Self, LoadError> {
        let file = fs::File::open(path);

        if file
            .as_ref()
            .is_err_and(|e| e.kind() == io::ErrorKind::NotFound)
        {
            let settings = Self::default();
            settings.save(path)?;

            return Ok(settings);
        }

        let mut file = file.map_err(LoadError::OpenFile)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(LoadError::ReadFile)?;

        let settings: Self = toml::from_str(&contents)?;

        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        let toml_string = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, toml_string.as_bytes())?;
        Ok(())
    }

    pub fn file_path() -> PathBuf {
        config_dir().join(SETTINGS_FILE)
    }

    /// The settings of a camera's inspector, defaults if it has never been inspected.
    pub fn camera(&self, name: &str) -> CaptureSettings {
        self.cameras
            .get(name)
            .cloned()
            .unwrap_or_else(CaptureSettings::inspector)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: CaptureSettings::window(),
            cameras: BTreeMap::new(),
        }
    }
}

impl CaptureSettings {
    pub fn window() -> Self {
        Self {
            file_name: WINDOW_TEMPLATE.to_string(),
            ..Default::default()
        }
    }

    pub fn inspector() -> Self {
        Self {
            file_name: INSPECTOR_TEMPLATE.to_string(),
            ..Default::default()
        }
    }

    /// The file name template, or `default` if none is set.
    pub fn template_or<'a>(&'a self, default: &'a str) -> &'a str {
        if self.file_name.is_empty() {
            default
        } else {
            &self.file_name
        }
    }
}

impl TryFrom<u32> for MultiSample {
    type Error = String;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        SampleCount::from_count(count)
            .map(Self)
            .ok_or_else(|| format!("{count} is not a sample count, expected 0, 2, 4 or 8"))
    }
}

impl From<MultiSample> for u32 {
    fn from(samples: MultiSample) -> Self {
        samples.0.count()
    }
}
