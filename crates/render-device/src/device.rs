use alloc::collections::BTreeMap;
use core::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::{Camera, DeviceError, OffscreenTarget, SampleCount};

/// Identifies a live device resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the device supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceCapabilities {
    /// The highest supported MSAA sample count.
    pub max_samples: SampleCount,

    /// The largest supported target width or height.
    pub max_dimension: u32,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            max_samples: SampleCount::X8,
            max_dimension: 16384,
        }
    }
}

/// The render device.
///
/// Tracks every live target, the target each camera renders into, and the active read surface.
/// Targets, bindings and the active surface release themselves on drop so nothing outlives the
/// capture that created it.
pub struct Device {
    capabilities: DeviceCapabilities,
    next_id: AtomicU64,
    allocations: Mutex<BTreeMap<ResourceId, String>>,
    bindings: Mutex<BTreeMap<String, ResourceId>>,
    active_surface: Mutex<Option<ResourceId>>,
}

impl Device {
    /// Creates a new device with the given capabilities.
    pub fn new(capabilities: DeviceCapabilities) -> Self {
        debug!(
            "Created device: max samples {:?}, max dimension {}",
            capabilities.max_samples, capabilities.max_dimension
        );

        Self {
            capabilities,
            next_id: AtomicU64::new(1),
            allocations: Mutex::new(BTreeMap::new()),
            bindings: Mutex::new(BTreeMap::new()),
            active_surface: Mutex::new(None),
        }
    }

    /// The device capabilities.
    pub fn capabilities(&self) -> DeviceCapabilities {
        self.capabilities
    }

    /// The sample count the device will use for a requested count.
    ///
    /// Unsupported counts fall back to the highest supported count below the request.
    pub fn supported_samples(&self, requested: SampleCount) -> SampleCount {
        let supported = requested.min(self.capabilities.max_samples);

        if supported != requested {
            warn!(
                "{}x MSAA is not supported, falling back to {:?}",
                requested.count(),
                supported
            );
        }

        supported
    }

    /// The number of live targets.
    pub fn live_allocations(&self) -> usize {
        self.allocations.lock().len()
    }

    /// The labels of every live target, in allocation order.
    pub fn allocation_labels(&self) -> Vec<String> {
        self.allocations.lock().values().cloned().collect()
    }

    /// The current active read surface.
    pub fn active_surface(&self) -> Option<ResourceId> {
        *self.active_surface.lock()
    }

    /// The target a camera is currently rendering into.
    pub fn bound_target(&self, camera: &str) -> Option<ResourceId> {
        self.bindings.lock().get(camera).copied()
    }

    /// Redirects a camera's output to a target until the binding is dropped.
    ///
    /// A camera can only be bound to one target at a time. Bindings are keyed by camera name, so
    /// cameras sharing a device must have unique names.
    pub fn bind_camera<'device>(
        &'device self,
        camera: &dyn Camera,
        target: &OffscreenTarget<'_>,
    ) -> Result<CameraBinding<'device>, DeviceError> {
        let mut bindings = self.bindings.lock();

        if let Some(existing) = bindings.get(camera.name()) {
            return Err(DeviceError::CameraBusy {
                camera: camera.name().to_string(),
                target: *existing,
            });
        }

        bindings.insert(camera.name().to_string(), target.id());
        debug!("Bound camera '{}' to {}", camera.name(), target.label());

        Ok(CameraBinding {
            device: self,
            camera: camera.name().to_string(),
            target: target.id(),
        })
    }

    /// Marks a target as the active read surface until the guard is dropped.
    pub fn make_active<'device>(
        &'device self,
        target: &OffscreenTarget<'_>,
    ) -> ActiveSurface<'device> {
        let previous = self.active_surface.lock().replace(target.id());

        ActiveSurface {
            device: self,
            previous,
        }
    }

    pub(crate) fn allocate(&self, label: &str) -> ResourceId {
        let id = ResourceId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.allocations.lock().insert(id, label.to_string());

        id
    }

    pub(crate) fn release(&self, id: ResourceId) {
        if self.allocations.lock().remove(&id).is_none() {
            warn!("Released unknown resource {id}");
        }
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::new(DeviceCapabilities::default())
    }
}

/// A camera rendering into a target. Dropping the binding detaches the camera.
pub struct CameraBinding<'device> {
    device: &'device Device,
    camera: String,
    target: ResourceId,
}

impl CameraBinding<'_> {
    /// The bound target.
    pub fn target(&self) -> ResourceId {
        self.target
    }

    /// Triggers a render of the camera into its bound target.
    pub fn render(
        &self,
        camera: &dyn Camera,
        target: &mut OffscreenTarget<'_>,
    ) -> Result<(), DeviceError> {
        if camera.name() != self.camera || target.id() != self.target {
            return Err(DeviceError::NotBound {
                camera: camera.name().to_string(),
                target: target.id(),
            });
        }

        let mut frame = target.frame();
        camera.render(&mut frame);

        Ok(())
    }
}

impl Drop for CameraBinding<'_> {
    fn drop(&mut self) {
        self.device.bindings.lock().remove(&self.camera);
        debug!("Detached camera '{}'", self.camera);
    }
}

/// The active read surface. Dropping the guard restores the previous surface.
pub struct ActiveSurface<'device> {
    device: &'device Device,
    previous: Option<ResourceId>,
}

impl Drop for ActiveSurface<'_> {
    fn drop(&mut self) {
        *self.device.active_surface.lock() = self.previous;
    }
}
