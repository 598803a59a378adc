use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use crate::failure::{Failure, Ignore};

/// Path to the config directory.
pub fn config_dir() -> PathBuf {
    let dir = dirs::config_dir()
        .report_and_panic("The config directory could not be retrieved")
        .join("Save Camera View");

    create_dir_all(&dir)
        .report("Could not create the config directory")
        .ignore();

    dir
}

/// The default capture directory, `Renders` next to the project's assets.
pub fn render_dir(project_root: Option<&Path>) -> PathBuf {
    match project_root {
        Some(root) => root.join("Renders"),
        None => config_dir().join("Renders"),
    }
}

/// The directory with exactly one trailing `/`.
pub fn with_trailing_separator(directory: &Path) -> PathBuf {
    let mut directory = directory
        .components()
        .collect::<PathBuf>()
        .into_os_string();

    if !directory.as_encoded_bytes().ends_with(b"/") {
        directory.push("/");
    }

    PathBuf::from(directory)
}
