use crate::input::{Key, Modifiers};
use crate::paint::Color;
use crate::render::{ParamError, PassId, RenderPipeline};

use super::{Binding, BindingKind, Component, DebugPanel, FolderId, ParamTarget, SliderRange};

/// Multiplier applied to the step while Shift is held.
const COARSE_STEP: f32 = 100.0;

/// Step for one color channel, one 8-bit level.
const COLOR_STEP: f32 = 1.0 / 255.0;

const CHANNELS: [Component; 3] = [Component::X, Component::Y, Component::Z];

/// Keyboard-driven debug panel.
///
/// - `F1` logs every binding with its current value
/// - `Tab` / `Shift+Tab` selects the next / previous binding
/// - `Up` / `Down` steps the selected slider (`Shift` for 100 steps)
/// - `Left` / `Right` picks the channel of a selected color binding
#[derive(Debug, Default)]
pub struct KeyboardPanel {
    folders: Vec<String>,
    bindings: Vec<Binding>,
    selected: usize,
    channel: usize,
}

impl KeyboardPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn selected(&self) -> Option<&Binding> {
        self.bindings.get(self.selected)
    }

    /// Channel edited on the selected color binding (`0` red … `2` blue).
    pub fn channel(&self) -> usize {
        self.channel
    }

    pub fn folder_name(&self, id: FolderId) -> &str {
        self.folders.get(id.0).map_or("", String::as_str)
    }

    /// Path shown in logs, e.g. `postprocess/glows/radius`.
    pub fn path(&self, binding: &Binding) -> String {
        match self.folder_name(binding.folder) {
            "" => binding.label.clone(),
            folder => format!("{folder}/{}", binding.label),
        }
    }

    /// Current scalar value of a slider, or of the active channel of a color.
    pub fn value(&self, index: usize, pipeline: &RenderPipeline) -> Option<f32> {
        let binding = self.bindings.get(index)?;
        let current = pipeline.parameter(binding.target.pass, binding.target.param)?;
        self.component(binding).read(current)
    }

    /// Writes `value` through the binding at `index`, clamped and snapped to
    /// its range. Returns the value actually written.
    pub fn set_value(
        &mut self,
        index: usize,
        value: f32,
        pipeline: &mut RenderPipeline,
    ) -> Result<f32, ParamError> {
        let Some(binding) = self.bindings.get(index) else {
            return Ok(value);
        };
        let target = binding.target;
        let component = self.component(binding);
        let value = match binding.kind {
            BindingKind::Slider(range) => range.apply(value),
            BindingKind::Color => value.clamp(0.0, 1.0),
        };

        let current = pipeline
            .parameter(target.pass, target.param)
            .ok_or(ParamError::NoSuchPass(target.pass.index()))?;
        let Some(next) = component.write(current, value) else {
            return Err(ParamError::KindMismatch {
                name: target.param.to_string(),
                expected: current.kind(),
                found: crate::render::ParamKind::Float,
            });
        };
        pipeline.set_parameter(target.pass, target.param, next)?;

        log::info!("debug: {} = {}", self.path(binding), self.describe(index, pipeline));
        Ok(value)
    }

    fn component(&self, binding: &Binding) -> Component {
        match binding.kind {
            BindingKind::Slider(_) => binding.target.component,
            BindingKind::Color => CHANNELS[self.channel % CHANNELS.len()],
        }
    }

    fn describe(&self, index: usize, pipeline: &RenderPipeline) -> String {
        let Some(binding) = self.bindings.get(index) else {
            return String::new();
        };
        match binding.kind {
            BindingKind::Slider(_) => self
                .value(index, pipeline)
                .map_or_else(|| "?".to_string(), |v| format!("{v:.3}")),
            BindingKind::Color => pipeline
                .parameter(binding.target.pass, binding.target.param)
                .and_then(|v| v.as_vec3())
                .map_or_else(|| "?".to_string(), |rgb| Color::from_rgb(rgb).to_hex()),
        }
    }

    fn list(&self, pipeline: &RenderPipeline) {
        for (i, binding) in self.bindings.iter().enumerate() {
            let marker = if i == self.selected { '>' } else { ' ' };
            log::info!("{marker} {} = {}", self.path(binding), self.describe(i, pipeline));
        }
    }

    fn step(&mut self, direction: f32, modifiers: Modifiers, pipeline: &mut RenderPipeline) -> bool {
        let Some(binding) = self.bindings.get(self.selected) else {
            return false;
        };
        let step = match binding.kind {
            BindingKind::Slider(range) => range.step,
            BindingKind::Color => COLOR_STEP,
        };
        let step = if modifiers.shift { step * COARSE_STEP } else { step };

        let Some(current) = self.value(self.selected, pipeline) else {
            return false;
        };
        if let Err(err) = self.set_value(self.selected, current + direction * step, pipeline) {
            log::warn!("debug: {err}");
        }
        true
    }

    fn cycle_channel(&mut self, forward: bool) -> bool {
        let Some(binding) = self.bindings.get(self.selected) else {
            return false;
        };
        if binding.kind != BindingKind::Color {
            return false;
        }
        let n = CHANNELS.len();
        self.channel = if forward {
            (self.channel + 1) % n
        } else {
            (self.channel + n - 1) % n
        };
        log::info!("debug: {} channel {}", self.path(binding), ["r", "g", "b"][self.channel]);
        true
    }

    fn cycle_selection(&mut self, forward: bool) -> bool {
        let n = self.bindings.len();
        if n == 0 {
            return false;
        }
        self.selected = if forward {
            (self.selected + 1) % n
        } else {
            (self.selected + n - 1) % n
        };
        self.channel = 0;
        if let Some(binding) = self.bindings.get(self.selected) {
            log::info!("debug: selected {}", self.path(binding));
        }
        true
    }
}

impl DebugPanel for KeyboardPanel {
    fn add_folder(&mut self, name: &str) -> FolderId {
        if let Some(i) = self.folders.iter().position(|f| f == name) {
            return FolderId(i);
        }
        self.folders.push(name.to_string());
        FolderId(self.folders.len() - 1)
    }

    fn bind(&mut self, folder: FolderId, label: &str, target: ParamTarget, range: SliderRange) {
        self.bindings.push(Binding {
            folder,
            label: label.to_string(),
            target,
            kind: BindingKind::Slider(range),
        });
    }

    fn bind_color(&mut self, folder: FolderId, label: &str, pass: PassId, param: &'static str) {
        self.bindings.push(Binding {
            folder,
            label: label.to_string(),
            target: ParamTarget::whole(pass, param),
            kind: BindingKind::Color,
        });
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers, pipeline: &mut RenderPipeline) -> bool {
        match key {
            Key::F1 => {
                self.list(pipeline);
                true
            }
            Key::Tab => self.cycle_selection(!modifiers.shift),
            Key::ArrowUp => self.step(1.0, modifiers, pipeline),
            Key::ArrowDown => self.step(-1.0, modifiers, pipeline),
            Key::ArrowRight => self.cycle_channel(true),
            Key::ArrowLeft => self.cycle_channel(false),
            _ => false,
        }
    }
}
