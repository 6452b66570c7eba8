//! Property bindings.
//!
//! A [`TypedBinding`] ties a property name to a write target in the host
//! scene `S` (a field accessor or a setter callback) and holds at most one
//! active [`Curve`] of the same value type. [`PropertyBinding`] erases the
//! value type behind a closed set of variants so the animator can keep
//! heterogeneous properties in one list; activating a persisted curve is a
//! plain kind comparison that fails with `TypeMismatch`.

use std::fmt;

use crate::curve::{AnyCurve, Curve, CurveKind, CurveMut, CurveRef};
use crate::error::AnimatorError;
use crate::value::{Interpolable, ValueKind, Vec3, Vec4};
use crate::Result;

/// Where an evaluated value is written.
pub enum Target<S, T> {
    /// Exclusive access to a field of the scene.
    Field(fn(&mut S) -> &mut T),
    /// Callback receiving the new value (e.g. to rebuild derived data).
    Setter(Box<dyn FnMut(&mut S, T)>),
}

impl<S, T> Target<S, T> {
    pub fn setter(f: impl FnMut(&mut S, T) + 'static) -> Self {
        Target::Setter(Box::new(f))
    }

    #[inline]
    fn write(&mut self, scene: &mut S, value: T) {
        match self {
            Target::Field(field) => *field(scene) = value,
            Target::Setter(setter) => setter(scene, value),
        }
    }
}

impl<S, T> fmt::Debug for Target<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Field(_) => f.write_str("Field"),
            Target::Setter(_) => f.write_str("Setter"),
        }
    }
}

/// A named property of value type `T` and its optional active curve.
pub struct TypedBinding<S, T: Interpolable> {
    name: String,
    kind: CurveKind,
    target: Target<S, T>,
    default_value: T,
    curve: Option<Curve<T>>,
}

impl<S, T: Animatable> TypedBinding<S, T> {
    pub fn new(
        name: impl Into<String>,
        kind: CurveKind,
        target: Target<S, T>,
        default_value: T,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            target,
            default_value,
            curve: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    #[inline]
    pub fn default_value(&self) -> T {
        self.default_value
    }

    /// Replace any active curve with a fresh one seeded from the default.
    pub fn activate_animation(&mut self) {
        self.deactivate_animation();
        self.curve = Some(Curve::new(self.kind, self.name.clone(), self.default_value));
    }

    /// Adopt `source` as the active curve. Fails without touching the current
    /// curve when the source kind differs from this binding's kind.
    pub fn activate_with(&mut self, source: AnyCurve) -> Result<()> {
        let actual = source.kind();
        if actual != self.kind {
            return Err(self.mismatch(actual));
        }
        let mut curve = T::unwrap_curve(source).map_err(|other| self.mismatch(other.kind()))?;
        curve.set_property_name(&self.name);
        self.deactivate_animation();
        self.curve = Some(curve);
        Ok(())
    }

    fn mismatch(&self, actual: CurveKind) -> AnimatorError {
        AnimatorError::TypeMismatch {
            property: self.name.clone(),
            expected: self.kind,
            actual,
        }
    }

    /// Release the active curve. Returns whether there was one.
    pub fn deactivate_animation(&mut self) -> bool {
        self.curve.take().is_some()
    }

    #[inline]
    pub fn is_activated(&self) -> bool {
        self.curve.is_some()
    }

    #[inline]
    pub fn curve(&self) -> Option<&Curve<T>> {
        self.curve.as_ref()
    }

    #[inline]
    pub fn curve_mut(&mut self) -> Option<&mut Curve<T>> {
        self.curve.as_mut()
    }

    /// Evaluate the active curve at `time` and write the result into `scene`.
    /// No-op without an active curve.
    pub fn update(&mut self, time: f32, scene: &mut S) {
        if let Some(curve) = self.curve.as_ref() {
            let value = curve.evaluate(time);
            self.target.write(scene, value);
        }
    }
}

impl<S, T: Interpolable> fmt::Debug for TypedBinding<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedBinding")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("default_value", &self.default_value)
            .field("curve", &self.curve)
            .finish()
    }
}

/// Type-erased property binding; one variant per supported value type.
pub enum PropertyBinding<S> {
    Scalar(TypedBinding<S, f32>),
    Integer(TypedBinding<S, i32>),
    Vector3(TypedBinding<S, Vec3>),
    Vector4(TypedBinding<S, Vec4>),
}

impl<S> PropertyBinding<S> {
    pub fn name(&self) -> &str {
        for_each_variant!(PropertyBinding, self, b => b.name())
    }

    pub fn kind(&self) -> CurveKind {
        for_each_variant!(PropertyBinding, self, b => b.kind())
    }

    pub fn value_kind(&self) -> ValueKind {
        self.kind().value_kind()
    }

    pub fn activate_animation(&mut self) {
        for_each_variant!(PropertyBinding, self, b => b.activate_animation())
    }

    pub fn activate_with(&mut self, source: AnyCurve) -> Result<()> {
        for_each_variant!(PropertyBinding, self, b => b.activate_with(source))
    }

    pub fn deactivate_animation(&mut self) -> bool {
        for_each_variant!(PropertyBinding, self, b => b.deactivate_animation())
    }

    pub fn is_activated(&self) -> bool {
        for_each_variant!(PropertyBinding, self, b => b.is_activated())
    }

    pub fn curve(&self) -> Option<CurveRef<'_>> {
        match self {
            PropertyBinding::Scalar(b) => b.curve().map(CurveRef::Scalar),
            PropertyBinding::Integer(b) => b.curve().map(CurveRef::Integer),
            PropertyBinding::Vector3(b) => b.curve().map(CurveRef::Vector3),
            PropertyBinding::Vector4(b) => b.curve().map(CurveRef::Vector4),
        }
    }

    pub fn curve_mut(&mut self) -> Option<CurveMut<'_>> {
        match self {
            PropertyBinding::Scalar(b) => b.curve_mut().map(CurveMut::Scalar),
            PropertyBinding::Integer(b) => b.curve_mut().map(CurveMut::Integer),
            PropertyBinding::Vector3(b) => b.curve_mut().map(CurveMut::Vector3),
            PropertyBinding::Vector4(b) => b.curve_mut().map(CurveMut::Vector4),
        }
    }

    pub fn update(&mut self, time: f32, scene: &mut S) {
        for_each_variant!(PropertyBinding, self, b => b.update(time, scene))
    }
}

impl<S> fmt::Debug for PropertyBinding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for_each_variant!(PropertyBinding, self, b => fmt::Debug::fmt(b, f))
    }
}

/// Glue between a concrete value type and the closed variant enums.
pub trait Animatable: Interpolable {
    fn wrap_curve(curve: Curve<Self>) -> AnyCurve;

    /// Take the typed curve out, or hand the source back untouched.
    fn unwrap_curve(curve: AnyCurve) -> std::result::Result<Curve<Self>, AnyCurve>;

    fn wrap_binding<S>(binding: TypedBinding<S, Self>) -> PropertyBinding<S>;

    fn typed<S>(binding: &PropertyBinding<S>) -> Option<&TypedBinding<S, Self>>;

    fn typed_mut<S>(binding: &mut PropertyBinding<S>) -> Option<&mut TypedBinding<S, Self>>;
}

macro_rules! impl_animatable {
    ($ty:ty, $variant:ident) => {
        impl Animatable for $ty {
            #[inline]
            fn wrap_curve(curve: Curve<Self>) -> AnyCurve {
                AnyCurve::$variant(curve)
            }

            fn unwrap_curve(curve: AnyCurve) -> std::result::Result<Curve<Self>, AnyCurve> {
                match curve {
                    AnyCurve::$variant(c) => Ok(c),
                    other => Err(other),
                }
            }

            #[inline]
            fn wrap_binding<S>(binding: TypedBinding<S, Self>) -> PropertyBinding<S> {
                PropertyBinding::$variant(binding)
            }

            fn typed<S>(binding: &PropertyBinding<S>) -> Option<&TypedBinding<S, Self>> {
                match binding {
                    PropertyBinding::$variant(b) => Some(b),
                    _ => None,
                }
            }

            fn typed_mut<S>(
                binding: &mut PropertyBinding<S>,
            ) -> Option<&mut TypedBinding<S, Self>> {
                match binding {
                    PropertyBinding::$variant(b) => Some(b),
                    _ => None,
                }
            }
        }
    };
}

impl_animatable!(f32, Scalar);
impl_animatable!(i32, Integer);
impl_animatable!(Vec3, Vector3);
impl_animatable!(Vec4, Vector4);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Dummy {
        shininess: f32,
        n: i32,
        n_writes: u32,
    }

    fn shininess_binding() -> TypedBinding<Dummy, f32> {
        TypedBinding::new(
            "Shininess",
            CurveKind::Shininess,
            Target::Field(|s: &mut Dummy| &mut s.shininess),
            0.0,
        )
    }

    #[test]
    fn update_without_curve_is_a_no_op() {
        let mut b = shininess_binding();
        let mut scene = Dummy {
            shininess: 7.0,
            ..Default::default()
        };
        b.update(1.0, &mut scene);
        assert_eq!(scene.shininess, 7.0);
    }

    #[test]
    fn activation_seeds_a_flat_curve_from_the_default() {
        let mut b = shininess_binding();
        b.activate_animation();
        let c = b.curve().unwrap();
        assert_eq!(c.states(), &[0.0, 0.0]);
        assert_eq!(c.property_name(), "Shininess");
        assert!(b.deactivate_animation());
        assert!(!b.deactivate_animation());
        assert!(!b.is_activated());
    }

    #[test]
    fn setter_target_receives_evaluated_values() {
        let mut b: TypedBinding<Dummy, i32> = TypedBinding::new(
            "N",
            CurveKind::FaceCount,
            Target::setter(|s: &mut Dummy, v| {
                s.n = v;
                s.n_writes += 1;
            }),
            3,
        );
        let curve = Curve::from_parts(CurveKind::FaceCount, "N", 0.0, 2.0, 3, vec![3, 9]);
        b.activate_with(AnyCurve::Integer(curve)).unwrap();
        let mut scene = Dummy::default();
        b.update(1.0, &mut scene);
        assert_eq!(scene.n, 6);
        assert_eq!(scene.n_writes, 1);
    }

    #[test]
    fn activating_with_the_wrong_kind_keeps_the_current_curve() {
        let mut b = shininess_binding();
        b.activate_animation();
        let scalar = Curve::new(CurveKind::Scalar, "Shininess", 1.0f32);
        let err = b.activate_with(AnyCurve::Scalar(scalar)).unwrap_err();
        assert_eq!(
            err,
            AnimatorError::TypeMismatch {
                property: "Shininess".into(),
                expected: CurveKind::Shininess,
                actual: CurveKind::Scalar,
            }
        );
        assert!(b.is_activated());

        let color = Curve::new(CurveKind::Color3, "Shininess", [1.0, 1.0, 1.0]);
        assert!(b.activate_with(AnyCurve::Vector3(color)).is_err());
    }

    #[test]
    fn adopted_curves_take_the_binding_name() {
        let mut b = shininess_binding();
        let c = Curve::new(CurveKind::Shininess, "Old name", 2.0f32);
        b.activate_with(AnyCurve::Scalar(c)).unwrap();
        assert_eq!(b.curve().unwrap().property_name(), "Shininess");
    }

    #[test]
    fn erased_binding_dispatches_by_variant() {
        let mut erased = f32::wrap_binding(shininess_binding());
        assert_eq!(erased.name(), "Shininess");
        assert_eq!(erased.value_kind(), ValueKind::Scalar);
        assert!(erased.curve().is_none());
        erased.activate_animation();
        erased.curve_mut().unwrap().set_end_time(4.0);
        assert_eq!(erased.curve().unwrap().end_time(), 4.0);
        assert!(f32::typed(&erased).is_some());
        assert!(i32::typed(&erased).is_none());
    }
}
