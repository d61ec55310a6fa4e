use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::selection::ClickSelectionPlugin;
use crate::snap::SnapPlugin;
use crate::ui::UiPlugin;

/// Configuration for [`CollisionSnapPlugin`]
#[derive(Debug, Clone, Default)]
pub struct CollisionSnapPluginConfig {
    /// Add left-click picking of [`Selectable`](crate::Selectable) entities.
    /// Leave off when the host editor manages `Selected` itself.
    pub click_selection: bool,
}

/// Main plugin bundling the snap tool.
///
/// Expects Avian3D's `PhysicsPlugins` to be added by the host; colliders only
/// show up in sweeps once the physics schedule has synced them.
#[derive(Default)]
pub struct CollisionSnapPlugin {
    pub config: CollisionSnapPluginConfig,
}

impl CollisionSnapPlugin {
    pub fn with_click_selection() -> Self {
        Self {
            config: CollisionSnapPluginConfig {
                click_selection: true,
            },
        }
    }
}

impl Plugin for CollisionSnapPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin::default());
        }

        app.add_plugins(SnapPlugin).add_plugins(UiPlugin);

        if self.config.click_selection {
            app.add_plugins(ClickSelectionPlugin);
        }
    }
}
