//! Live-editable bindings onto pass parameters.
//!
//! Core code always talks to a `Box<dyn DebugPanel>`; when debugging is off
//! that is a [`NullDebugPanel`], so nothing branches on whether a panel exists.

mod binding;
mod keyboard;
mod null;

pub use binding::{Binding, BindingKind, Component, FolderId, ParamTarget, SliderRange};
pub use keyboard::KeyboardPanel;
pub use null::NullDebugPanel;

use crate::config::Config;
use crate::input::{Key, Modifiers};
use crate::render::{PassId, RenderPipeline};

/// Interactive control surface over pass parameters.
///
/// Bindings hold only non-owning [`ParamTarget`]s. Every edit goes through
/// [`RenderPipeline::set_parameter`] and shows on the next execute.
pub trait DebugPanel {
    /// Adds a folder; nested folders use `/`-separated names.
    fn add_folder(&mut self, name: &str) -> FolderId;

    /// Adds a numeric slider over one scalar component.
    fn bind(&mut self, folder: FolderId, label: &str, target: ParamTarget, range: SliderRange);

    /// Adds an RGB color editor over the whole `Vec3` parameter `param`.
    /// The edited channel is chosen inside the panel.
    fn bind_color(&mut self, folder: FolderId, label: &str, pass: PassId, param: &'static str);

    /// Handles a key press. Returns whether the panel consumed it.
    fn handle_key(&mut self, key: Key, modifiers: Modifiers, pipeline: &mut RenderPipeline) -> bool;
}

/// Panel for this launch: the keyboard panel in debug mode, otherwise the
/// no-op panel.
pub fn panel_for(config: &Config) -> Box<dyn DebugPanel> {
    if config.debug {
        log::info!("debug panel enabled (F1 lists bindings)");
        Box::new(KeyboardPanel::new())
    } else {
        Box::new(NullDebugPanel)
    }
}
