//! sysleds: indicator light control through Linux LED class control files.

pub mod config;
pub mod controller;
pub mod error;
pub mod led;
pub mod module;
pub mod state;
pub mod sysfs;

pub use controller::{LightController, LightDevice, LightId};
pub use error::{LightsError, status_of};
pub use module::{LightsModule, MODULE_INFO, ModuleInfo};
pub use state::{BrightnessMode, FlashMode, LightState};
