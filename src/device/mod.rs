//! Boundary contracts for the drop-box hardware around the scanner.
//!
//! Concrete drivers (distance sensor, e-paper display, camera) live outside
//! this crate; only their interfaces and the counting loop that ties them
//! together are defined here.

use std::path::PathBuf;

/// Readings closer than this mean an envelope is passing the sensor
pub const MIN_DROP_DISTANCE_CM: u32 = 20;

/// Distance sensor. `None` when no reading could be taken.
pub trait DistanceSensor {
    /// Current distance in centimetres
    fn distance_cm(&mut self) -> Option<u32>;
}

/// Count display
pub trait CountDisplay {
    /// Draw `count`
    fn show(&mut self, count: u32);
}

/// Camera capture failure
#[derive(Debug, thiserror::Error)]
#[error("capture failed: {0}")]
pub struct CaptureError(pub String);

/// Still camera that saves captures to disk
pub trait Camera {
    /// Take a picture and return where it was saved
    fn capture(&mut self) -> Result<PathBuf, CaptureError>;
}

/// Wraps a display so it is only redrawn when the count changes
pub struct ChangeOnlyDisplay<D> {
    inner: D,
    shown: Option<u32>,
}

impl<D: CountDisplay> ChangeOnlyDisplay<D> {
    /// Wrap `inner`; the first update always draws
    pub fn new(inner: D) -> Self {
        Self { inner, shown: None }
    }

    /// Draw `count` unless it is already on screen
    pub fn update(&mut self, count: u32) -> bool {
        if self.shown == Some(count) {
            return false;
        }
        self.inner.show(count);
        self.shown = Some(count);
        true
    }

    /// Wrapped display
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

/// What one poll of the sensor did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// Nothing passed the sensor (or it gave no reading)
    Idle,
    /// An envelope was counted; carries the capture, if one was taken
    Counted {
        /// Count after the increment
        count: u32,
        /// Saved picture
        capture: Option<PathBuf>,
    },
}

/// Envelope counter driven by a distance sensor
pub struct DropCounter<S, D, C> {
    sensor: S,
    display: ChangeOnlyDisplay<D>,
    camera: C,
    count: u32,
    threshold_cm: u32,
}

impl<S, D, C> DropCounter<S, D, C>
where
    S: DistanceSensor,
    D: CountDisplay,
    C: Camera,
{
    /// Start at zero and draw it
    pub fn new(sensor: S, display: D, camera: C) -> Self {
        let mut display = ChangeOnlyDisplay::new(display);
        display.update(0);
        Self {
            sensor,
            display,
            camera,
            count: 0,
            threshold_cm: MIN_DROP_DISTANCE_CM,
        }
    }

    /// Current count
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Display wrapper
    pub fn display(&self) -> &ChangeOnlyDisplay<D> {
        &self.display
    }

    /// Take one sensor reading and count an envelope if something is close
    pub fn poll(&mut self) -> PollEvent {
        match self.sensor.distance_cm() {
            Some(distance) if distance < self.threshold_cm => {}
            Some(_) => return PollEvent::Idle,
            None => {
                log::trace!("device: no distance reading");
                return PollEvent::Idle;
            }
        }

        self.count = self.count.saturating_add(1);
        self.display.update(self.count);
        log::debug!("device: count {}", self.count);

        let capture = match self.camera.capture() {
            Ok(path) => Some(path),
            Err(err) => {
                log::warn!("device: {}", err);
                None
            }
        };
        PollEvent::Counted {
            count: self.count,
            capture,
        }
    }

    /// Back to zero (button press)
    pub fn reset(&mut self) {
        self.count = 0;
        self.display.update(0);
        log::debug!("device: count reset");
    }
}
