use crate::input::{Key, Modifiers};
use crate::render::{PassId, RenderPipeline};

use super::{DebugPanel, FolderId, ParamTarget, SliderRange};

/// Panel used when debugging is off. Accepts every binding and ignores it.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullDebugPanel;

impl DebugPanel for NullDebugPanel {
    fn add_folder(&mut self, _name: &str) -> FolderId {
        FolderId::ROOT
    }

    fn bind(&mut self, _folder: FolderId, _label: &str, _target: ParamTarget, _range: SliderRange) {}

    fn bind_color(&mut self, _folder: FolderId, _label: &str, _pass: PassId, _param: &'static str) {}

    fn handle_key(&mut self, _key: Key, _modifiers: Modifiers, _pipeline: &mut RenderPipeline) -> bool {
        false
    }
}
