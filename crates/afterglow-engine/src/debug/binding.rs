use crate::render::{ParamValue, PassId};

/// Folder handle returned by [`super::DebugPanel::add_folder`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FolderId(pub(crate) usize);

impl FolderId {
    pub const ROOT: FolderId = FolderId(usize::MAX);
}

/// Scalar component of a parameter value a slider edits.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Component {
    X,
    Y,
    Z,
    /// The whole value: a `Float` parameter, or the `Vec3` behind a color
    /// binding.
    Value,
}

impl Component {
    /// Reads this component, if the value has it.
    pub fn read(self, value: ParamValue) -> Option<f32> {
        match (value, self) {
            (ParamValue::Float(v), Component::Value) => Some(v),
            (ParamValue::Vec2(v), Component::X) => Some(v.x),
            (ParamValue::Vec2(v), Component::Y) => Some(v.y),
            (ParamValue::Vec3(v), Component::X) => Some(v.x),
            (ParamValue::Vec3(v), Component::Y) => Some(v.y),
            (ParamValue::Vec3(v), Component::Z) => Some(v.z),
            _ => None,
        }
    }

    /// Returns `value` with this component replaced by `x`.
    pub fn write(self, value: ParamValue, x: f32) -> Option<ParamValue> {
        match (value, self) {
            (ParamValue::Float(_), Component::Value) => Some(ParamValue::Float(x)),
            (ParamValue::Vec2(mut v), Component::X) => {
                v.x = x;
                Some(ParamValue::Vec2(v))
            }
            (ParamValue::Vec2(mut v), Component::Y) => {
                v.y = x;
                Some(ParamValue::Vec2(v))
            }
            (ParamValue::Vec3(mut v), Component::X) => {
                v.x = x;
                Some(ParamValue::Vec3(v))
            }
            (ParamValue::Vec3(mut v), Component::Y) => {
                v.y = x;
                Some(ParamValue::Vec3(v))
            }
            (ParamValue::Vec3(mut v), Component::Z) => {
                v.z = x;
                Some(ParamValue::Vec3(v))
            }
            _ => None,
        }
    }
}

/// Non-owning reference to one pass parameter (or one component of it).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ParamTarget {
    pub pass: PassId,
    pub param: &'static str,
    pub component: Component,
}

impl ParamTarget {
    pub fn new(pass: PassId, param: &'static str, component: Component) -> Self {
        Self {
            pass,
            param,
            component,
        }
    }

    /// Targets the whole parameter rather than one component.
    pub fn whole(pass: PassId, param: &'static str) -> Self {
        Self::new(pass, param, Component::Value)
    }
}

/// Slider bounds and step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamps to `[min, max]` and snaps to the step grid anchored at `min`.
    pub fn apply(&self, v: f32) -> f32 {
        let v = v.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return v;
        }
        let steps = ((v - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BindingKind {
    Slider(SliderRange),
    Color,
}

/// One registered control.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub folder: FolderId,
    pub label: String,
    pub target: ParamTarget,
    pub kind: BindingKind,
}
