use crate::error::*;
use crate::validate::ConfigValidator;
use log::debug;
use parking_lot::RwLock;
use std::sync::Arc;

/// Holds the current settings and lets them be replaced while requests are in flight.
///
/// Readers take an `Arc` snapshot with [`current`](SettingsMonitor::current) and keep it for
/// the whole operation, so an update is only seen by requests started after it. Clones share
/// the same underlying value.
#[derive(Debug)]
pub struct SettingsMonitor<T> {
    current: Arc<RwLock<Arc<T>>>,
}

impl<T> Clone for SettingsMonitor<T> {
    fn clone(&self) -> Self {
        SettingsMonitor {
            current: self.current.clone(),
        }
    }
}

impl<T> SettingsMonitor<T> {
    pub fn new(settings: T) -> Self {
        SettingsMonitor {
            current: Arc::new(RwLock::new(Arc::new(settings))),
        }
    }

    /// Create a monitor, rejecting settings that fail validation.
    pub fn try_new<V>(settings: T, validator: &V) -> Result<Self>
    where
        V: ConfigValidator<T>,
    {
        validator.validate(&settings).into_result()?;
        Ok(SettingsMonitor::new(settings))
    }

    /// A snapshot of the current settings.
    pub fn current(&self) -> Arc<T> {
        self.current.read().clone()
    }

    /// Replace the settings without validating them. Operations already holding a snapshot
    /// are unaffected. Use [`try_update`](SettingsMonitor::try_update) for settings from an
    /// untrusted source.
    pub fn update(&self, settings: T) {
        *self.current.write() = Arc::new(settings);
        debug!("settings updated");
    }

    /// Replace the settings if they pass validation; otherwise keep the current ones.
    pub fn try_update<V>(&self, settings: T, validator: &V) -> Result<()>
    where
        V: ConfigValidator<T>,
    {
        validator.validate(&settings).into_result()?;
        self.update(settings);
        Ok(())
    }
}
