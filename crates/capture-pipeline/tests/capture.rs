//! End to end capture tests.

use std::fs;

use capture_pipeline::{CaptureError, CaptureRequest, Environment, capture_view};
use chrono::{DateTime, Local, TimeZone};
use render_device::{
    Camera, Device, DeviceCapabilities, DeviceError, Extent, Frame, OffscreenTarget, SampleCount,
    TargetFormat, Triangle, Vertex,
};
use tempfile::tempdir;

struct TestEnvironment {
    scene: &'static str,
    resolution: Extent,
}

impl Environment for TestEnvironment {
    fn active_scene_name(&self) -> String {
        self.scene.to_string()
    }

    fn viewport_resolution(&self) -> Extent {
        self.resolution
    }

    fn now(&self) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 3).unwrap()
    }
}

struct SolidCamera {
    name: &'static str,
    color: [f32; 4],
    active: bool,
}

impl SolidCamera {
    fn new(name: &'static str, color: [f32; 4]) -> Self {
        Self {
            name,
            color,
            active: true,
        }
    }
}

impl Camera for SolidCamera {
    fn name(&self) -> &str {
        self.name
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn render(&self, frame: &mut Frame<'_, '_>) {
        frame.clear(self.color);
    }
}

/// Draws a white triangle over the top left half of the view on black.
struct DiagonalCamera;

impl Camera for DiagonalCamera {
    fn name(&self) -> &str {
        "Diagonal"
    }

    fn render(&self, frame: &mut Frame<'_, '_>) {
        let extent = frame.extent();
        let (width, height) = (extent.width as f32, extent.height as f32);

        frame.clear([0.0, 0.0, 0.0, 1.0]);
        frame.draw_triangle(&Triangle {
            vertices: [
                Vertex::new(0.0, 0.0, 0.5),
                Vertex::new(width, 0.0, 0.5),
                Vertex::new(0.0, height, 0.5),
            ],
            color: [1.0, 1.0, 1.0, 1.0],
        });
    }
}

fn environment(width: u32, height: u32) -> TestEnvironment {
    TestEnvironment {
        scene: "Level1",
        resolution: Extent::new(width, height),
    }
}

#[test]
fn writes_png_with_viewport_size() {
    let directory = tempdir().unwrap();
    let device = Device::default();
    let camera = SolidCamera::new("MainCam", [0.5, 0.0, 1.0, 1.0]);

    let output = capture_view(
        &device,
        &environment(16, 9),
        &CaptureRequest {
            camera: Some(&camera),
            directory: directory.path(),
            file_name: "{scene}_{camera}",
            samples: SampleCount::Disabled,
        },
    )
    .unwrap();

    assert_eq!(output.path, directory.path().join("Level1_MainCam.png"));
    assert_eq!(output.extent, Extent::new(16, 9));

    let image = image::open(&output.path).unwrap().into_rgba8();
    assert_eq!(image.dimensions(), (16, 9));

    for pixel in image.pixels() {
        assert_eq!(pixel.0, [188, 0, 255, 255]);
    }
}

#[test]
fn creates_missing_directories() {
    let root = tempdir().unwrap();
    let directory = root.path().join("project").join("Renders");
    let device = Device::default();
    let camera = SolidCamera::new("MainCam", [1.0; 4]);

    let output = capture_view(
        &device,
        &environment(4, 4),
        &CaptureRequest {
            camera: Some(&camera),
            directory: &directory,
            file_name: "shot",
            samples: SampleCount::X2,
        },
    )
    .unwrap();

    assert!(directory.is_dir());
    assert_eq!(output.path, directory.join("shot.png"));
    assert!(output.path.is_file());
}

#[test]
fn rooted_scene_name_stays_in_directory() {
    let root = tempdir().unwrap();
    let directory = root.path().join("Renders");
    let device = Device::default();
    let camera = SolidCamera::new("MainCam", [1.0; 4]);
    let environment = TestEnvironment {
        scene: "/escape",
        resolution: Extent::new(4, 4),
    };

    let output = capture_view(
        &device,
        &environment,
        &CaptureRequest {
            camera: Some(&camera),
            directory: &directory,
            file_name: "{scene}",
            samples: SampleCount::Disabled,
        },
    )
    .unwrap();

    assert_eq!(output.path, directory.join("escape.png"));
    assert!(output.path.is_file());
}

#[test]
fn nested_scene_name_creates_subdirectory() {
    let root = tempdir().unwrap();
    let directory = root.path().join("Renders");
    let device = Device::default();
    let camera = SolidCamera::new("MainCam", [1.0; 4]);
    let environment = TestEnvironment {
        scene: "Levels/Level1",
        resolution: Extent::new(4, 4),
    };

    let output = capture_view(
        &device,
        &environment,
        &CaptureRequest {
            camera: Some(&camera),
            directory: &directory,
            file_name: "{scene}",
            samples: SampleCount::Disabled,
        },
    )
    .unwrap();

    assert_eq!(output.path, directory.join("Levels").join("Level1.png"));
    assert!(output.path.is_file());
}

#[test]
fn second_capture_overwrites_first() {
    let directory = tempdir().unwrap();
    let device = Device::default();
    let red = SolidCamera::new("MainCam", [1.0, 0.0, 0.0, 1.0]);
    let blue = SolidCamera::new("MainCam", [0.0, 0.0, 1.0, 1.0]);

    for camera in [&red, &blue] {
        capture_view(
            &device,
            &environment(3, 3),
            &CaptureRequest {
                camera: Some(camera),
                directory: directory.path(),
                file_name: "{camera}",
                samples: SampleCount::Disabled,
            },
        )
        .unwrap();
    }

    let entries = fs::read_dir(directory.path()).unwrap().count();
    assert_eq!(entries, 1);

    let image = image::open(directory.path().join("MainCam.png"))
        .unwrap()
        .into_rgba8();
    assert_eq!(image.get_pixel(1, 1).0, [0, 0, 255, 255]);
}

#[test]
fn no_camera_writes_nothing() {
    let root = tempdir().unwrap();
    let directory = root.path().join("Renders");
    let device = Device::default();

    let error = capture_view(
        &device,
        &environment(4, 4),
        &CaptureRequest {
            camera: None,
            directory: &directory,
            file_name: "shot",
            samples: SampleCount::X4,
        },
    )
    .unwrap_err();

    assert!(matches!(error, CaptureError::NoCamera));
    assert!(error.is_precondition());
    assert!(!directory.exists());
    assert_eq!(device.live_allocations(), 0);
}

#[test]
fn inactive_camera_writes_nothing() {
    let root = tempdir().unwrap();
    let directory = root.path().join("Renders");
    let device = Device::default();
    let camera = SolidCamera {
        active: false,
        ..SolidCamera::new("Disabled Cam", [1.0; 4])
    };

    let error = capture_view(
        &device,
        &environment(4, 4),
        &CaptureRequest {
            camera: Some(&camera),
            directory: &directory,
            file_name: "shot",
            samples: SampleCount::Disabled,
        },
    )
    .unwrap_err();

    match error {
        CaptureError::InactiveCamera { camera } => assert_eq!(camera, "Disabled Cam"),
        error => panic!("unexpected error: {error}"),
    }
    assert!(!directory.exists());
    assert_eq!(device.live_allocations(), 0);
}

#[test]
fn empty_viewport_is_rejected() {
    let directory = tempdir().unwrap();
    let device = Device::default();
    let camera = SolidCamera::new("MainCam", [1.0; 4]);

    let error = capture_view(
        &device,
        &environment(0, 720),
        &CaptureRequest {
            camera: Some(&camera),
            directory: directory.path(),
            file_name: "shot",
            samples: SampleCount::Disabled,
        },
    )
    .unwrap_err();

    assert!(matches!(error, CaptureError::InvalidResolution(_)));
    assert!(error.is_precondition());
    assert_eq!(fs::read_dir(directory.path()).unwrap().count(), 0);
}

#[test]
fn busy_camera_is_rejected_before_allocating() {
    let directory = tempdir().unwrap();
    let device = Device::default();
    let camera = SolidCamera::new("MainCam", [1.0; 4]);

    let other = OffscreenTarget::new(
        &device,
        Extent::new(2, 2),
        TargetFormat::Rgba32Float,
        SampleCount::Disabled,
        "Game View",
    )
    .unwrap();
    let _binding = device.bind_camera(&camera, &other).unwrap();

    let error = capture_view(
        &device,
        &environment(4, 4),
        &CaptureRequest {
            camera: Some(&camera),
            directory: directory.path(),
            file_name: "shot",
            samples: SampleCount::Disabled,
        },
    )
    .unwrap_err();

    assert!(matches!(
        error,
        CaptureError::Device(DeviceError::CameraBusy { .. })
    ));
    assert!(error.is_precondition());
    assert_eq!(device.allocation_labels(), vec!["Game View".to_string()]);
    assert_eq!(device.bound_target("MainCam"), Some(other.id()));
}

#[test]
fn releases_resources_after_success() {
    let directory = tempdir().unwrap();
    let device = Device::default();
    let camera = SolidCamera::new("MainCam", [0.25; 4]);

    capture_view(
        &device,
        &environment(8, 8),
        &CaptureRequest {
            camera: Some(&camera),
            directory: directory.path(),
            file_name: "shot",
            samples: SampleCount::X8,
        },
    )
    .unwrap();

    assert_eq!(device.live_allocations(), 0);
    assert_eq!(device.active_surface(), None);
    assert_eq!(device.bound_target("MainCam"), None);
}

#[test]
fn releases_resources_when_directory_cannot_be_created() {
    let root = tempdir().unwrap();
    let blocker = root.path().join("Renders");
    fs::write(&blocker, b"not a directory").unwrap();

    let device = Device::default();
    let camera = SolidCamera::new("MainCam", [0.25; 4]);

    let error = capture_view(
        &device,
        &environment(8, 8),
        &CaptureRequest {
            camera: Some(&camera),
            directory: &blocker.join("nested"),
            file_name: "shot",
            samples: SampleCount::X4,
        },
    )
    .unwrap_err();

    assert!(matches!(error, CaptureError::CreateDirectory { .. }));
    assert!(!error.is_precondition());
    assert_eq!(device.live_allocations(), 0);
    assert_eq!(device.active_surface(), None);
    assert_eq!(device.bound_target("MainCam"), None);
}

#[test]
fn oversized_viewport_releases_resources() {
    let directory = tempdir().unwrap();
    let device = Device::new(DeviceCapabilities {
        max_dimension: 32,
        ..Default::default()
    });
    let camera = SolidCamera::new("MainCam", [0.25; 4]);

    let error = capture_view(
        &device,
        &environment(64, 8),
        &CaptureRequest {
            camera: Some(&camera),
            directory: directory.path(),
            file_name: "shot",
            samples: SampleCount::Disabled,
        },
    )
    .unwrap_err();

    assert!(matches!(
        error,
        CaptureError::Device(DeviceError::ExtentTooLarge { .. })
    ));
    assert_eq!(device.live_allocations(), 0);
    assert_eq!(device.bound_target("MainCam"), None);
}

#[test]
fn multisampling_smooths_edges() {
    let directory = tempdir().unwrap();
    let device = Device::default();

    let output = capture_view(
        &device,
        &environment(4, 4),
        &CaptureRequest {
            camera: Some(&DiagonalCamera),
            directory: directory.path(),
            file_name: "{camera} {samples}",
            samples: SampleCount::X4,
        },
    )
    .unwrap();

    assert_eq!(output.path, directory.path().join("Diagonal MSAA4.png"));
    assert_eq!(output.samples, SampleCount::X4);

    let image = image::open(&output.path).unwrap().into_rgba8();

    // Two of the four sample positions in this pixel fall inside the triangle.
    assert_eq!(image.get_pixel(1, 2).0, [188, 188, 188, 255]);
    assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(image.get_pixel(3, 3).0, [0, 0, 0, 255]);
}

#[test]
fn unsupported_sample_count_falls_back() {
    let directory = tempdir().unwrap();
    let device = Device::new(DeviceCapabilities {
        max_samples: SampleCount::X2,
        ..Default::default()
    });
    let camera = SolidCamera::new("MainCam", [1.0; 4]);

    let output = capture_view(
        &device,
        &environment(4, 4),
        &CaptureRequest {
            camera: Some(&camera),
            directory: directory.path(),
            file_name: "{samples}",
            samples: SampleCount::X8,
        },
    )
    .unwrap();

    assert_eq!(output.samples, SampleCount::X2);
    assert_eq!(output.path, directory.path().join("MSAA8.png"));
}

#[test]
fn template_with_date_and_time() {
    let directory = tempdir().unwrap();
    let device = Device::default();
    let camera = SolidCamera::new("MainCam", [1.0; 4]);

    let output = capture_view(
        &device,
        &environment(2, 2),
        &CaptureRequest {
            camera: Some(&camera),
            directory: directory.path(),
            file_name: "{scene} {camera} {date} {time}",
            samples: SampleCount::Disabled,
        },
    )
    .unwrap();

    assert_eq!(
        output.path,
        directory.path().join("Level1 MainCam 2024-03-07 9-05-03.0.png")
    );
}
