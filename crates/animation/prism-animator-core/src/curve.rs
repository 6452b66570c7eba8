//! Keyframe curves.
//!
//! A curve owns an ordered list of keyframe states of one value type and a
//! time window. Evaluation clamps the time into the window, normalizes it to
//! `t` in [0, 1] and reduces the states with De Casteljau's algorithm, so two
//! states interpolate linearly and more states give a smooth Bezier blend.
//!
//! Invariants kept by every mutation:
//! - `states.len() >= MIN_STATES_COUNT`
//! - `0 <= start_time <= end_time`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interp::de_casteljau;
use crate::value::{Interpolable, ValueKind, Vec3, Vec4};

/// Fewest keyframe states a curve may hold.
pub const MIN_STATES_COUNT: usize = 2;

/// Type discriminator of a curve. Each kind maps to exactly one value type and
/// may carry its own edit-time clamp.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CurveKind {
    /// Unclamped scalar.
    Scalar,
    /// Material shininess, clamped to `[0, 128]`.
    Shininess,
    /// Unclamped integer.
    Integer,
    /// Prism face count, clamped to `>= 3`.
    FaceCount,
    /// Position / rotation / scale style vector.
    Vector3,
    /// RGB color.
    Color3,
    /// RGBA color.
    Color4,
}

impl CurveKind {
    pub const SHININESS_MIN: f32 = 0.0;
    pub const SHININESS_MAX: f32 = 128.0;
    pub const FACE_COUNT_MIN: i32 = 3;

    pub const ALL: [CurveKind; 7] = [
        CurveKind::Scalar,
        CurveKind::Shininess,
        CurveKind::Integer,
        CurveKind::FaceCount,
        CurveKind::Vector3,
        CurveKind::Color3,
        CurveKind::Color4,
    ];

    /// Value type curves of this kind hold.
    #[inline]
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Self::Scalar | Self::Shininess => ValueKind::Scalar,
            Self::Integer | Self::FaceCount => ValueKind::Integer,
            Self::Vector3 | Self::Color3 => ValueKind::Vector3,
            Self::Color4 => ValueKind::Vector4,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "Scalar",
            Self::Shininess => "Shininess",
            Self::Integer => "Integer",
            Self::FaceCount => "FaceCount",
            Self::Vector3 => "Vector3",
            Self::Color3 => "Color3",
            Self::Color4 => "Color4",
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyframe curve over values of type `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve<T: Interpolable> {
    kind: CurveKind,
    property_name: String,
    start_time: f32,
    end_time: f32,
    states: Vec<T>,
    default_value: T,
}

impl<T: Interpolable> Curve<T> {
    /// Fresh curve with an empty `[0, 0]` window and two validated copies of
    /// `default_value`.
    pub fn new(kind: CurveKind, property_name: impl Into<String>, default_value: T) -> Self {
        debug_assert_eq!(kind.value_kind(), T::KIND, "curve kind does not match value type");
        let mut curve = Self {
            kind,
            property_name: property_name.into(),
            start_time: 0.0,
            end_time: 0.0,
            states: Vec::with_capacity(MIN_STATES_COUNT),
            default_value,
        };
        curve.change_states_count(MIN_STATES_COUNT);
        curve
    }

    /// Rebuild a curve from persisted parts.
    ///
    /// Negative times become 0, an inverted window collapses to its start and a
    /// short state list is padded with validated defaults. Stored states are
    /// kept as written.
    pub fn from_parts(
        kind: CurveKind,
        property_name: impl Into<String>,
        start_time: f32,
        end_time: f32,
        default_value: T,
        states: Vec<T>,
    ) -> Self {
        debug_assert_eq!(kind.value_kind(), T::KIND, "curve kind does not match value type");
        let mut curve = Self {
            kind,
            property_name: property_name.into(),
            start_time: start_time.max(0.0),
            end_time: end_time.max(0.0),
            states,
            default_value,
        };
        curve.heal_window();
        if curve.states.len() < MIN_STATES_COUNT {
            curve.change_states_count(MIN_STATES_COUNT);
        }
        curve
    }

    #[inline]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    #[inline]
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    pub(crate) fn set_property_name(&mut self, name: &str) {
        if self.property_name != name {
            self.property_name = name.to_owned();
        }
    }

    #[inline]
    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    #[inline]
    pub fn end_time(&self) -> f32 {
        self.end_time
    }

    #[inline]
    pub fn default_value(&self) -> T {
        self.default_value
    }

    #[inline]
    pub fn states(&self) -> &[T] {
        &self.states
    }

    #[inline]
    pub fn states_count(&self) -> usize {
        self.states.len()
    }

    /// Negative input becomes 0; the end is pushed forward if it now lies
    /// before the start.
    pub fn set_start_time(&mut self, value: f32) {
        self.start_time = value.max(0.0);
        self.heal_window();
    }

    /// Negative input becomes 0; an end before the start collapses onto it.
    pub fn set_end_time(&mut self, value: f32) {
        self.end_time = value.max(0.0);
        self.heal_window();
    }

    pub fn set_time_window(&mut self, start: f32, end: f32) {
        self.start_time = start.max(0.0);
        self.end_time = end.max(0.0);
        self.heal_window();
    }

    fn heal_window(&mut self) {
        if self.end_time < self.start_time {
            self.end_time = self.start_time;
        }
    }

    /// Overwrite one state, passing it through the kind's clamp.
    /// Returns `false` when `index` is out of range.
    pub fn set_state(&mut self, index: usize, value: T) -> bool {
        let kind = self.kind;
        match self.states.get_mut(index) {
            Some(slot) => {
                *slot = value.validate(kind);
                true
            }
            None => false,
        }
    }

    /// Resize the state list. Counts below [`MIN_STATES_COUNT`] are raised to
    /// it; growing appends validated copies of the default, shrinking drops
    /// trailing states.
    pub fn change_states_count(&mut self, count: usize) {
        let count = count.max(MIN_STATES_COUNT);
        if count <= self.states.len() {
            self.states.truncate(count);
            return;
        }
        let fill = self.default_value.validate(self.kind);
        self.states.resize(count, fill);
    }

    /// Evaluate at normalized `t` (0 = first state, 1 = last state).
    pub fn evaluate_parameter(&self, t: f32) -> T {
        let mut points: Vec<T::Blend> = self.states.iter().map(|s| s.to_blend()).collect();
        match de_casteljau(&mut points, t, T::scaled_add) {
            Some(blend) => T::from_blend(blend),
            None => self.default_value,
        }
    }

    /// Evaluate at timeline `time`, clamped into the curve's window.
    pub fn evaluate(&self, time: f32) -> T {
        let time = if time < self.start_time {
            self.start_time
        } else if time > self.end_time {
            self.end_time
        } else {
            time
        };
        let span = self.end_time - self.start_time;
        let t = if span == 0.0 {
            0.0
        } else {
            (time - self.start_time) / span
        };
        self.evaluate_parameter(t)
    }

    /// Evenly spaced samples over the normalized domain, `segments + 1` values
    /// from `t = 0` to `t = 1`. Used for plotting a curve preview.
    pub fn preview(&self, segments: usize) -> Vec<T> {
        if segments == 0 {
            return vec![self.evaluate_parameter(0.0)];
        }
        let step = 1.0 / segments as f32;
        (0..=segments)
            .map(|i| self.evaluate_parameter(step * i as f32))
            .collect()
    }
}

/// Curve of any supported value type. Persisted clips decode into this before
/// they are matched against a typed binding.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyCurve {
    Scalar(Curve<f32>),
    Integer(Curve<i32>),
    Vector3(Curve<Vec3>),
    Vector4(Curve<Vec4>),
}

/// Borrowed view of a bound curve.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CurveRef<'a> {
    Scalar(&'a Curve<f32>),
    Integer(&'a Curve<i32>),
    Vector3(&'a Curve<Vec3>),
    Vector4(&'a Curve<Vec4>),
}

/// Mutable view of a bound curve for editors.
#[derive(Debug)]
pub enum CurveMut<'a> {
    Scalar(&'a mut Curve<f32>),
    Integer(&'a mut Curve<i32>),
    Vector3(&'a mut Curve<Vec3>),
    Vector4(&'a mut Curve<Vec4>),
}

impl AnyCurve {
    pub fn kind(&self) -> CurveKind {
        for_each_variant!(AnyCurve, self, c => c.kind())
    }

    pub fn value_kind(&self) -> ValueKind {
        self.kind().value_kind()
    }

    pub fn property_name(&self) -> &str {
        for_each_variant!(AnyCurve, self, c => c.property_name())
    }

    pub fn start_time(&self) -> f32 {
        for_each_variant!(AnyCurve, self, c => c.start_time())
    }

    pub fn end_time(&self) -> f32 {
        for_each_variant!(AnyCurve, self, c => c.end_time())
    }

    pub fn states_count(&self) -> usize {
        for_each_variant!(AnyCurve, self, c => c.states_count())
    }

    pub fn view(&self) -> CurveRef<'_> {
        match self {
            AnyCurve::Scalar(c) => CurveRef::Scalar(c),
            AnyCurve::Integer(c) => CurveRef::Integer(c),
            AnyCurve::Vector3(c) => CurveRef::Vector3(c),
            AnyCurve::Vector4(c) => CurveRef::Vector4(c),
        }
    }
}

impl<'a> CurveRef<'a> {
    pub fn kind(&self) -> CurveKind {
        for_each_variant!(CurveRef, self, c => c.kind())
    }

    pub fn property_name(&self) -> &'a str {
        for_each_variant!(CurveRef, *self, c => c.property_name())
    }

    pub fn start_time(&self) -> f32 {
        for_each_variant!(CurveRef, self, c => c.start_time())
    }

    pub fn end_time(&self) -> f32 {
        for_each_variant!(CurveRef, self, c => c.end_time())
    }

    pub fn states_count(&self) -> usize {
        for_each_variant!(CurveRef, self, c => c.states_count())
    }

    /// Clone the viewed curve into an owned [`AnyCurve`].
    pub fn to_any(&self) -> AnyCurve {
        match *self {
            CurveRef::Scalar(c) => AnyCurve::Scalar(c.clone()),
            CurveRef::Integer(c) => AnyCurve::Integer(c.clone()),
            CurveRef::Vector3(c) => AnyCurve::Vector3(c.clone()),
            CurveRef::Vector4(c) => AnyCurve::Vector4(c.clone()),
        }
    }
}

impl CurveMut<'_> {
    pub fn kind(&self) -> CurveKind {
        for_each_variant!(CurveMut, self, c => c.kind())
    }

    pub fn states_count(&self) -> usize {
        for_each_variant!(CurveMut, self, c => c.states_count())
    }

    pub fn set_start_time(&mut self, value: f32) {
        for_each_variant!(CurveMut, self, c => c.set_start_time(value))
    }

    pub fn set_end_time(&mut self, value: f32) {
        for_each_variant!(CurveMut, self, c => c.set_end_time(value))
    }

    pub fn change_states_count(&mut self, count: usize) {
        for_each_variant!(CurveMut, self, c => c.change_states_count(count))
    }
}
