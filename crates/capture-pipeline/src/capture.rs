use std::path::{Path, PathBuf};

use render_device::{
    Camera, Device, DeviceError, Extent, OffscreenTarget, SampleCount, SdrImage, SrgbBlit,
    TargetFormat,
};
use tracing::{debug, info, info_span};
use utilities::DebugTime;

use crate::{
    CaptureError, Environment, TemplateContext, encode_png, ensure_directory, output_path,
    resolve_file_name, write_png,
};

/// What to capture and where to write it.
#[derive(Clone, Copy)]
pub struct CaptureRequest<'a> {
    /// The camera to capture, `None` when the host has no camera to offer.
    pub camera: Option<&'a dyn Camera>,

    /// The output directory, created if missing.
    pub directory: &'a Path,

    /// The file name template, without the extension.
    pub file_name: &'a str,

    /// The requested multisample count.
    pub samples: SampleCount,
}

/// A successful capture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureOutput {
    /// The written PNG.
    pub path: PathBuf,

    /// The image size.
    pub extent: Extent,

    /// The sample count the device rendered with.
    pub samples: SampleCount,
}

/// Captures a camera's view to a PNG.
///
/// Every device resource is released before returning, including on error. Precondition
/// failures return before anything is allocated or written.
pub fn capture_view<E>(
    device: &Device,
    environment: &E,
    request: &CaptureRequest<'_>,
) -> Result<CaptureOutput, CaptureError>
where
    E: Environment + ?Sized,
{
    let _span = info_span!("capture_view").entered();
    let _timing = DebugTime::start("Capture");

    let camera = request.camera.ok_or(CaptureError::NoCamera)?;

    if !camera.is_active() {
        return Err(CaptureError::InactiveCamera {
            camera: camera.name().to_string(),
        });
    }

    let extent = environment.viewport_resolution();
    if extent.is_empty() {
        return Err(CaptureError::InvalidResolution(extent));
    }

    if let Some(target) = device.bound_target(camera.name()) {
        return Err(DeviceError::CameraBusy {
            camera: camera.name().to_string(),
            target,
        }
        .into());
    }

    let samples = device.supported_samples(request.samples);
    let image = render_display_image(device, camera, extent, samples)?;

    let scene = environment.active_scene_name();
    let context = TemplateContext {
        scene: &scene,
        camera: camera.name(),
        samples: request.samples,
        timestamp: environment.now(),
    };

    let file_name = resolve_file_name(request.file_name, &context);
    let path = output_path(request.directory, &file_name);

    ensure_directory(path.parent().unwrap_or(request.directory))?;

    let bytes = {
        let _timing = DebugTime::start("Encoding PNG");
        encode_png(&image)?
    };
    drop(image);

    write_png(&path, &bytes)?;

    info!(
        "Saved {extent} capture of '{}' to {}",
        camera.name(),
        path.display()
    );

    Ok(CaptureOutput {
        path,
        extent,
        samples,
    })
}

/// Renders a camera into a linear HDR target and converts it to display referred sRGB.
///
/// The camera is detached and every target released before this returns.
pub fn render_display_image(
    device: &Device,
    camera: &dyn Camera,
    extent: Extent,
    samples: SampleCount,
) -> Result<SdrImage, CaptureError> {
    let mut target = OffscreenTarget::new(
        device,
        extent,
        TargetFormat::Rgba32Float,
        samples,
        "Capture HDR Target",
    )?;

    let binding = device.bind_camera(camera, &target)?;

    {
        let _timing = DebugTime::start("Rendering camera");
        binding.render(camera, &mut target)?;
    }

    let _active = device.make_active(&target);

    let hdr_image = {
        let _timing = DebugTime::start("Reading HDR target");
        target.read_pixels()?
    };
    debug!("HDR capture maximum: {:.3}", hdr_image.maximum());

    let sdr_image = SrgbBlit::new(device).run(&hdr_image)?;

    Ok(sdr_image)
}
