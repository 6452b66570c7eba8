//! Interpolable value contract: which value types a curve can animate and the
//! scaled-add arithmetic each one blends with.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::curve::CurveKind;
use crate::interp::{scaled_add_f32, scaled_add_vec3, scaled_add_vec4};

/// 3-component vector or RGB color.
pub type Vec3 = [f32; 3];
/// 4-component vector or RGBA color.
pub type Vec4 = [f32; 4];

/// Value types a property can hold.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar,
    Integer,
    Vector3,
    Vector4,
}

impl ValueKind {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Integer => "integer",
            Self::Vector3 => "vector3",
            Self::Vector4 => "vector4",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value type a keyframe curve can animate.
///
/// Blending happens in `Blend` space: floats and vectors blend as themselves,
/// integers blend as `f32` and are truncated toward zero only once the
/// reduction has produced its final value.
pub trait Interpolable:
    Copy + PartialEq + fmt::Debug + Serialize + DeserializeOwned + 'static
{
    /// Working representation used while blending.
    type Blend: Copy;

    const KIND: ValueKind;

    fn to_blend(self) -> Self::Blend;

    fn from_blend(blend: Self::Blend) -> Self;

    /// `a * wa + b * wb`, component-wise.
    fn scaled_add(a: Self::Blend, wa: f32, b: Self::Blend, wb: f32) -> Self::Blend;

    /// Clamp applied when a state is edited or created for a curve of `kind`.
    /// Identity unless the kind defines a range.
    #[inline]
    fn validate(self, kind: CurveKind) -> Self {
        let _ = kind;
        self
    }
}

impl Interpolable for f32 {
    type Blend = f32;
    const KIND: ValueKind = ValueKind::Scalar;

    #[inline]
    fn to_blend(self) -> f32 {
        self
    }

    #[inline]
    fn from_blend(blend: f32) -> Self {
        blend
    }

    #[inline]
    fn scaled_add(a: f32, wa: f32, b: f32, wb: f32) -> f32 {
        scaled_add_f32(a, wa, b, wb)
    }

    fn validate(self, kind: CurveKind) -> Self {
        match kind {
            CurveKind::Shininess => self.clamp(CurveKind::SHININESS_MIN, CurveKind::SHININESS_MAX),
            _ => self,
        }
    }
}

/// Distance from an integer under which an integer blend counts as exact.
pub const INTEGER_SNAP_EPSILON: f32 = 1e-4;

impl Interpolable for i32 {
    type Blend = f32;
    const KIND: ValueKind = ValueKind::Integer;

    #[inline]
    fn to_blend(self) -> f32 {
        self as f32
    }

    /// Truncates toward zero; `as` saturates at the i32 bounds and maps NaN to 0.
    /// Blends within [`INTEGER_SNAP_EPSILON`] of an integer snap to it first, so
    /// f32 round-off (e.g. `0.9 * 3 + 0.1 * 3 = 2.9999998`) cannot drop a step.
    #[inline]
    fn from_blend(blend: f32) -> Self {
        let nearest = blend.round();
        if (blend - nearest).abs() <= INTEGER_SNAP_EPSILON {
            nearest as i32
        } else {
            blend as i32
        }
    }

    #[inline]
    fn scaled_add(a: f32, wa: f32, b: f32, wb: f32) -> f32 {
        scaled_add_f32(a, wa, b, wb)
    }

    fn validate(self, kind: CurveKind) -> Self {
        match kind {
            CurveKind::FaceCount => self.max(CurveKind::FACE_COUNT_MIN),
            _ => self,
        }
    }
}

impl Interpolable for Vec3 {
    type Blend = Vec3;
    const KIND: ValueKind = ValueKind::Vector3;

    #[inline]
    fn to_blend(self) -> Vec3 {
        self
    }

    #[inline]
    fn from_blend(blend: Vec3) -> Self {
        blend
    }

    #[inline]
    fn scaled_add(a: Vec3, wa: f32, b: Vec3, wb: f32) -> Vec3 {
        scaled_add_vec3(a, wa, b, wb)
    }
}

impl Interpolable for Vec4 {
    type Blend = Vec4;
    const KIND: ValueKind = ValueKind::Vector4;

    #[inline]
    fn to_blend(self) -> Vec4 {
        self
    }

    #[inline]
    fn from_blend(blend: Vec4) -> Self {
        blend
    }

    #[inline]
    fn scaled_add(a: Vec4, wa: f32, b: Vec4, wb: f32) -> Vec4 {
        scaled_add_vec4(a, wa, b, wb)
    }
}
