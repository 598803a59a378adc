use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};
use render_device::SdrImage;
use tracing::info;

use crate::CaptureError;

/// Creates the output directory and any missing parents.
pub fn ensure_directory(directory: &Path) -> Result<(), CaptureError> {
    if directory.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(directory).map_err(|source| CaptureError::CreateDirectory {
        path: directory.to_path_buf(),
        source,
    })?;

    info!("Created output directory {}", directory.display());
    Ok(())
}

/// The path of a PNG named `file_name` inside `directory`.
///
/// Repeated and trailing separators in the directory are collapsed so exactly one separator
/// sits between the directory and the name. Root, prefix and `..` components of the name are
/// dropped, so the file never lands outside `directory`.
pub fn output_path(directory: &Path, file_name: &str) -> PathBuf {
    let mut path: PathBuf = directory.components().collect();

    let file_name = format!("{file_name}.png");
    path.extend(
        Path::new(&file_name)
            .components()
            .filter(|component| matches!(component, Component::Normal(_))),
    );

    path
}

/// Encodes an sRGB image as an 8-bit `RGBA` PNG.
pub fn encode_png(image: &SdrImage) -> Result<Vec<u8>, CaptureError> {
    let mut bytes = Vec::new();

    PngEncoder::new(&mut bytes).write_image(
        image.as_bytes(),
        image.extent.width,
        image.extent.height,
        ExtendedColorType::Rgba8,
    )?;

    Ok(bytes)
}

/// Writes the PNG bytes, replacing any existing file.
pub fn write_png(path: &Path, bytes: &[u8]) -> Result<(), CaptureError> {
    fs::write(path, bytes).map_err(|source| CaptureError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::output_path;

    #[test]
    fn exactly_one_separator_before_the_name() {
        let expected = PathBuf::from("Renders/Level1.png");

        assert_eq!(output_path(Path::new("Renders"), "Level1"), expected);
        assert_eq!(output_path(Path::new("Renders/"), "Level1"), expected);
        assert_eq!(output_path(Path::new("Renders//"), "Level1"), expected);
    }

    #[test]
    fn nested_directories_are_kept() {
        assert_eq!(
            output_path(Path::new("/tmp/project/Renders/"), "shot"),
            PathBuf::from("/tmp/project/Renders/shot.png")
        );
    }

    #[test]
    fn names_stay_inside_the_directory() {
        let directory = Path::new("/work/Renders/");

        assert_eq!(
            output_path(directory, "/tmp/escape"),
            PathBuf::from("/work/Renders/tmp/escape.png")
        );
        assert_eq!(
            output_path(directory, "../../up"),
            PathBuf::from("/work/Renders/up.png")
        );
        assert_eq!(
            output_path(directory, "./shot"),
            PathBuf::from("/work/Renders/shot.png")
        );
    }
}
