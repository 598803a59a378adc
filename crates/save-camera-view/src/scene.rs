use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use capture_pipeline::Environment;
use render_device::{Camera, Extent, Frame, Rect, Triangle, Vertex, color::LinearColor};
use serde::Deserialize;
use thiserror::Error;

const DEMO_SCENE: &str = include_str!("../assets/demo-scene.toml");

/// A scene description, the registry of cameras and what they see.
///
/// Shape coordinates are in view units where `[0, 0]` is the top left and `[1, 1]` the bottom
/// right of an unzoomed camera.
#[derive(Debug, Deserialize)]
pub struct Scene {
    pub name: String,

    /// Captures default to `Renders` inside this directory.
    #[serde(default)]
    pub project_root: Option<PathBuf>,

    /// The main viewport resolution.
    pub resolution: [u32; 2],

    #[serde(default)]
    pub main_camera: Option<String>,

    #[serde(default)]
    pub cameras: Vec<CameraDescription>,

    #[serde(default)]
    pub shapes: Vec<Shape>,
}

#[derive(Debug, Deserialize)]
pub struct CameraDescription {
    pub name: String,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(default = "default_background")]
    pub background: LinearColor,

    /// The view position at the top left of the camera.
    #[serde(default)]
    pub position: [f32; 2],

    #[serde(default = "default_zoom")]
    pub zoom: f32,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Rect {
        min: [f32; 2],
        max: [f32; 2],
        #[serde(default = "default_depth")]
        depth: f32,
        color: LinearColor,
    },

    Triangle {
        points: [[f32; 2]; 3],
        #[serde(default = "default_depth")]
        depth: f32,
        color: LinearColor,
    },
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to read scene file '{}':\n{source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to deserialize scene:\n{0}")]
    Deserialize(#[from] toml::de::Error),

    #[error("The scene has more than one camera named '{0}'")]
    DuplicateCamera(String),

    #[error("The main camera '{0}' is not in the scene")]
    UnknownMainCamera(String),
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let contents = fs::read_to_string(path).map_err(|source| SceneError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents)
    }

    pub fn demo() -> Result<Self, SceneError> {
        Self::parse(DEMO_SCENE)
    }

    pub fn parse(contents: &str) -> Result<Self, SceneError> {
        let scene: Self = toml::from_str(contents)?;

        let mut names = BTreeSet::new();
        for camera in &scene.cameras {
            if !names.insert(camera.name.as_str()) {
                return Err(SceneError::DuplicateCamera(camera.name.clone()));
            }
        }

        if let Some(main_camera) = &scene.main_camera {
            if !names.contains(main_camera.as_str()) {
                return Err(SceneError::UnknownMainCamera(main_camera.clone()));
            }
        }

        Ok(scene)
    }

    /// Looks up a camera by name, active or not.
    pub fn camera(&self, name: &str) -> Option<SceneCamera<'_>> {
        self.cameras
            .iter()
            .find(|camera| camera.name == name)
            .map(|description| SceneCamera {
                description,
                shapes: &self.shapes,
            })
    }

    /// The main camera, if the scene has one and it is active.
    pub fn main_camera(&self) -> Option<SceneCamera<'_>> {
        let name = self.main_camera.as_deref()?;

        self.camera(name).filter(|camera| camera.is_active())
    }
}

impl Environment for Scene {
    fn active_scene_name(&self) -> String {
        self.name.clone()
    }

    fn viewport_resolution(&self) -> Extent {
        Extent::from(self.resolution)
    }
}

/// A camera in a scene, renders the scene's shapes.
pub struct SceneCamera<'scene> {
    description: &'scene CameraDescription,
    shapes: &'scene [Shape],
}

impl SceneCamera<'_> {
    fn to_pixels(&self, point: [f32; 2], extent: Extent) -> [f32; 2] {
        let [x, y] = self.description.position;
        let zoom = self.description.zoom;

        [
            (point[0] - x) * zoom * extent.width as f32,
            (point[1] - y) * zoom * extent.height as f32,
        ]
    }
}

impl Camera for SceneCamera<'_> {
    fn name(&self) -> &str {
        &self.description.name
    }

    fn is_active(&self) -> bool {
        self.description.active
    }

    fn render(&self, frame: &mut Frame<'_, '_>) {
        let extent = frame.extent();
        frame.clear(self.description.background);

        for shape in self.shapes {
            match shape {
                Shape::Rect {
                    min,
                    max,
                    depth,
                    color,
                } => {
                    let rect = Rect {
                        min: self.to_pixels(*min, extent),
                        max: self.to_pixels(*max, extent),
                    };

                    frame.fill_rect(rect, *depth, *color);
                }

                Shape::Triangle {
                    points,
                    depth,
                    color,
                } => {
                    let vertices = points.map(|point| {
                        let [x, y] = self.to_pixels(point, extent);
                        Vertex::new(x, y, *depth)
                    });

                    frame.draw_triangle(&Triangle {
                        vertices,
                        color: *color,
                    });
                }
            }
        }
    }
}

fn default_active() -> bool {
    true
}

fn default_background() -> LinearColor {
    [0.0, 0.0, 0.0, 1.0]
}

fn default_zoom() -> f32 {
    1.0
}

fn default_depth() -> f32 {
    0.5
}
