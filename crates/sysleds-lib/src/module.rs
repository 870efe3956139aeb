//! Module descriptor: the metadata and single entry point a host loader sees.

use serde::Serialize;

use crate::controller::{LightController, LightDevice};
use crate::error::Result;
use crate::sysfs::LedSink;

/// Static description of the lights module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleInfo {
    /// Stable identifier the host looks the module up by.
    pub id: &'static str,
    pub name: &'static str,
    pub author: &'static str,
    pub version_major: u16,
    pub version_minor: u16,
}

impl ModuleInfo {
    pub fn version(&self) -> String {
        format!("{}.{}", self.version_major, self.version_minor)
    }
}

pub const MODULE_INFO: ModuleInfo = ModuleInfo {
    id: "lights",
    name: "TI OMAP lights Module",
    author: "Google, Inc.",
    version_major: 1,
    version_minor: 0,
};

/// The lights module: descriptor plus the `open` method.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightsModule;

impl LightsModule {
    pub fn info(&self) -> &'static ModuleInfo {
        &MODULE_INFO
    }

    /// Open the light named `name` on `controller`.
    pub fn open<'c, S: LedSink>(
        &self,
        controller: &'c LightController<S>,
        name: &str,
    ) -> Result<LightDevice<'c, S>> {
        controller.open(name)
    }
}
