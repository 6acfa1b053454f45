//! Pass parameters and their WGSL uniform-block packing.

use glam::{Vec2, Vec3};

/// Name of the texture parameter through which the pipeline feeds a pass the
/// previous stage's output.
pub const INPUT_PARAM: &str = "input";

/// Intermediate color target slot used by the ping-pong chain.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TargetSlot {
    A,
    B,
}

impl TargetSlot {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            TargetSlot::A => TargetSlot::B,
            TargetSlot::B => TargetSlot::A,
        }
    }
}

/// Texture handle stored in a texture parameter.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextureSource {
    /// Nothing bound; the pass samples a 1x1 black texture.
    #[default]
    Unbound,
    /// One of the pipeline's intermediate targets.
    Target(TargetSlot),
}

/// Kind of a parameter value. Fixed per key at construction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ParamKind {
    Float,
    Vec2,
    Vec3,
    Texture,
}

/// Typed parameter value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Texture(TextureSource),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Vec2(_) => ParamKind::Vec2,
            ParamValue::Vec3(_) => ParamKind::Vec3,
            ParamValue::Texture(_) => ParamKind::Texture,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            ParamValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match *self {
            ParamValue::Vec2(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match *self {
            ParamValue::Vec3(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_texture(&self) -> Option<TextureSource> {
        match *self {
            ParamValue::Texture(t) => Some(t),
            _ => None,
        }
    }
}

/// Error returned when writing a pass parameter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("pass {pass:?} has no parameter {name:?}")]
    Unknown { pass: String, name: String },
    #[error("parameter {name:?} is {expected:?}, got {found:?}")]
    KindMismatch {
        name: String,
        expected: ParamKind,
        found: ParamKind,
    },
    #[error("pipeline has no pass #{0}")]
    NoSuchPass(usize),
}

/// Ordered, fixed-key parameter set owned by one pass.
///
/// Declaration order is the WGSL struct field order used by [`Uniforms::pack`].
/// Keys and kinds are fixed once built; [`Uniforms::set`] only replaces values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Uniforms {
    entries: Vec<(&'static str, ParamValue)>,
}

impl Uniforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style declaration. Only used while constructing a pass.
    pub fn with(mut self, name: &'static str, value: ParamValue) -> Self {
        debug_assert!(self.get(name).is_none(), "duplicate parameter {name}");
        self.entries.push((name, value));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, ParamValue)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, *value))
    }

    /// Replaces the value of an existing key of the same kind.
    ///
    /// `owner` only labels the error.
    pub fn set(&mut self, owner: &str, name: &str, value: ParamValue) -> Result<(), ParamError> {
        let Some((_, slot)) = self.entries.iter_mut().find(|(key, _)| *key == name) else {
            return Err(ParamError::Unknown {
                pass: owner.to_string(),
                name: name.to_string(),
            });
        };

        if slot.kind() != value.kind() {
            return Err(ParamError::KindMismatch {
                name: name.to_string(),
                expected: slot.kind(),
                found: value.kind(),
            });
        }

        *slot = value;
        Ok(())
    }

    /// Packs the non-texture values into a WGSL uniform block.
    ///
    /// Layout rules: `f32` align 4, `vec2<f32>` align 8, `vec3<f32>` align 16
    /// (size 12), struct size rounded up to 16. Never returns an empty buffer.
    pub fn pack(&self) -> Vec<u8> {
        let mut words: Vec<f32> = Vec::new();

        for (_, value) in &self.entries {
            match *value {
                ParamValue::Float(v) => words.push(v),
                ParamValue::Vec2(v) => {
                    pad_to(&mut words, 2);
                    words.extend_from_slice(&v.to_array());
                }
                ParamValue::Vec3(v) => {
                    pad_to(&mut words, 4);
                    words.extend_from_slice(&v.to_array());
                }
                ParamValue::Texture(_) => {}
            }
        }

        pad_to(&mut words, 4);
        if words.is_empty() {
            words.resize(4, 0.0);
        }

        bytemuck::cast_slice(&words).to_vec()
    }
}

fn pad_to(words: &mut Vec<f32>, align_words: usize) {
    let rem = words.len() % align_words;
    if rem != 0 {
        words.resize(words.len() + (align_words - rem), 0.0);
    }
}
