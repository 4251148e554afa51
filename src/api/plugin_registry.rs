use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartPlugin;
use crate::render::ChartRenderer;

use super::{StreamingEngine, TimerHost};

impl<R: ChartRenderer, H: TimerHost> StreamingEngine<R, H> {
    /// Adds a plugin observing engine events. Ids must be non-empty and unique.
    ///
    /// Plugins receive events in registration order.
    pub fn register_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        let id = plugin.id();
        if id.is_empty() {
            return Err(ChartError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if self.has_plugin(id) {
            return Err(ChartError::InvalidData(format!(
                "plugin with id `{id}` is already registered"
            )));
        }
        debug!(plugin = id, "registered plugin");
        self.plugins.push(plugin);
        Ok(())
    }

    /// Removes the plugin with `plugin_id`, returning it when found.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> Option<Box<dyn ChartPlugin>> {
        let position = self
            .plugins
            .iter()
            .position(|plugin| plugin.id() == plugin_id)?;
        debug!(plugin = plugin_id, "unregistered plugin");
        Some(self.plugins.remove(position))
    }

    pub fn plugin_ids(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|plugin| plugin.id())
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugin_ids().any(|id| id == plugin_id)
    }
}
