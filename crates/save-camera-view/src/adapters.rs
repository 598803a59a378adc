use std::path::PathBuf;

use capture_pipeline::{CaptureError, CaptureOutput, CaptureRequest, capture_view};
use render_device::{Camera, Device, DeviceError};
use tracing::info;

use crate::{
    directories::{render_dir, with_trailing_separator},
    scene::{Scene, SceneCamera},
    settings::{CaptureSettings, INSPECTOR_TEMPLATE, WINDOW_TEMPLATE},
};

/// Captures the scene's main camera with the window's settings.
pub fn capture_window(
    device: &Device,
    scene: &Scene,
    settings: &CaptureSettings,
) -> Result<CaptureOutput, CaptureError> {
    let camera = scene.main_camera();

    println!("Scene: {}", scene.name);
    println!(
        "Camera: {}",
        camera.as_ref().map_or("None", |camera| camera.name())
    );

    capture(
        device,
        scene,
        camera.as_ref().map(|camera| camera as &dyn Camera),
        settings,
        WINDOW_TEMPLATE,
    )
}

/// Captures a camera with its own settings.
pub fn capture_inspector(
    device: &Device,
    scene: &Scene,
    camera: &SceneCamera<'_>,
    settings: &CaptureSettings,
) -> Result<CaptureOutput, CaptureError> {
    capture(device, scene, Some(camera), settings, INSPECTOR_TEMPLATE)
}

fn capture(
    device: &Device,
    scene: &Scene,
    camera: Option<&dyn Camera>,
    settings: &CaptureSettings,
    default_template: &str,
) -> Result<CaptureOutput, CaptureError> {
    let directory = output_directory(scene, settings);

    let request = CaptureRequest {
        camera,
        directory: &directory,
        file_name: settings.template_or(default_template),
        samples: settings.samples.0,
    };

    capture_view(device, scene, &request)
}

/// The directory captures are written to, ending in a single `/`.
pub fn output_directory(scene: &Scene, settings: &CaptureSettings) -> PathBuf {
    let directory = match &settings.directory {
        Some(directory) if !directory.as_os_str().is_empty() => directory.clone(),
        _ => render_dir(scene.project_root.as_deref()),
    };

    with_trailing_separator(&directory)
}

/// Prints where captures go and if the directory exists yet.
pub fn reveal(scene: &Scene, settings: &CaptureSettings) -> bool {
    let directory = output_directory(scene, settings);
    let exists = directory.is_dir();

    info!("Revealing {}", directory.display());

    println!("{}", directory.display());
    if !exists {
        println!("The directory does not exist yet, it is created by the next capture.");
    }

    exists
}

/// What to tell the user when a capture fails.
pub fn failure_message(error: &CaptureError) -> &'static str {
    match error {
        CaptureError::NoCamera => "No active camera found in the scene view",
        CaptureError::InactiveCamera { .. } => "Selected camera is inactive",
        CaptureError::InvalidResolution(_) => "The viewport has no size to capture",
        CaptureError::Device(DeviceError::CameraBusy { .. }) => {
            "The camera is already being captured"
        }
        CaptureError::CreateDirectory { .. } => "Could not create the output directory",
        _ => "Could not save the camera view",
    }
}
