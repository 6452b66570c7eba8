//! Animator: property registry + playback clock.
//!
//! Methods:
//! - register_field / register_setter (construction time)
//! - activate / deactivate property animations, enumerate for editors
//! - update (advance clock → evaluate each active binding → write into scene)
//!
//! The animator owns its bindings but not the scene they write into; the host
//! passes `&mut S` to [`Animator::update`] every frame.

use hashbrown::HashMap;

use crate::binding::{Animatable, PropertyBinding, Target, TypedBinding};
use crate::clock::{AnimationMode, PlaybackClock};
use crate::config::AnimatorConfig;
use crate::curve::{Curve, CurveKind, CurveMut, CurveRef};
use crate::error::AnimatorError;
use crate::Result;

/// Drives the registered properties of a scene of type `S` through time.
pub struct Animator<S> {
    cfg: AnimatorConfig,
    pub(crate) clock: PlaybackClock,
    pub(crate) properties: Vec<PropertyBinding<S>>,
    pub(crate) index: HashMap<String, usize>,
    /// Indices into `properties`, in activation order. Each at most once.
    pub(crate) animated: Vec<usize>,
}

impl<S> Animator<S> {
    pub fn new() -> Self {
        Self::with_config(AnimatorConfig::default())
    }

    pub fn with_config(cfg: AnimatorConfig) -> Self {
        Self {
            clock: PlaybackClock::new(cfg.animation_time, cfg.mode, cfg.enabled),
            cfg,
            properties: Vec::new(),
            index: HashMap::new(),
            animated: Vec::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &AnimatorConfig {
        &self.cfg
    }

    // ----- registration -----

    /// Register a property written straight into a field of the scene.
    pub fn register_field<T: Animatable>(
        &mut self,
        name: impl Into<String>,
        kind: CurveKind,
        field: fn(&mut S) -> &mut T,
        default_value: T,
    ) -> Result<()> {
        self.register(name.into(), kind, Target::Field(field), default_value)
    }

    /// Register a property written through a setter callback.
    pub fn register_setter<T, F>(
        &mut self,
        name: impl Into<String>,
        kind: CurveKind,
        setter: F,
        default_value: T,
    ) -> Result<()>
    where
        T: Animatable,
        F: FnMut(&mut S, T) + 'static,
    {
        self.register(name.into(), kind, Target::setter(setter), default_value)
    }

    fn register<T: Animatable>(
        &mut self,
        name: String,
        kind: CurveKind,
        target: Target<S, T>,
        default_value: T,
    ) -> Result<()> {
        if self.index.contains_key(&name) {
            return Err(AnimatorError::DuplicateProperty { name });
        }
        if kind.value_kind() != T::KIND {
            return Err(AnimatorError::ValueKindMismatch {
                property: name,
                kind,
                value: T::KIND,
            });
        }
        let binding = TypedBinding::new(name.clone(), kind, target, default_value);
        self.index.insert(name, self.properties.len());
        self.properties.push(T::wrap_binding(binding));
        Ok(())
    }

    // ----- activation -----

    /// Start animating `name` with a fresh curve. Already animated properties
    /// keep their curve.
    pub fn activate_property_animation(&mut self, name: &str) -> Result<()> {
        let idx = self.property_index(name)?;
        let binding = &mut self.properties[idx];
        if binding.is_activated() {
            return Ok(());
        }
        binding.activate_animation();
        self.animated.push(idx);
        Ok(())
    }

    /// Stop animating `name` and drop its curve. Returns whether a curve was
    /// removed; unknown or inactive names are a no-op.
    pub fn deactivate_property_animation(&mut self, name: &str) -> bool {
        let Some(&idx) = self.index.get(name) else {
            return false;
        };
        let Some(pos) = self.animated.iter().position(|&i| i == idx) else {
            return false;
        };
        self.animated.remove(pos);
        self.properties[idx].deactivate_animation()
    }

    pub(crate) fn deactivate_all(&mut self) {
        for idx in self.animated.drain(..) {
            self.properties[idx].deactivate_animation();
        }
    }

    fn property_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| AnimatorError::UnknownProperty {
                name: name.to_owned(),
            })
    }

    // ----- enumeration (editor listing) -----

    #[inline]
    pub fn properties_count(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn animated_properties_count(&self) -> usize {
        self.animated.len()
    }

    /// Registered property name by registration index.
    pub fn property_name(&self, index: usize) -> Option<&str> {
        self.properties.get(index).map(PropertyBinding::name)
    }

    /// Whether the property at registration `index` is animated.
    pub fn is_animated_property(&self, index: usize) -> bool {
        self.properties
            .get(index)
            .is_some_and(PropertyBinding::is_activated)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(PropertyBinding::name)
    }

    /// Names of registered properties that are not animated yet.
    pub fn inactive_property_names(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|b| !b.is_activated())
            .map(PropertyBinding::name)
    }

    pub fn property_kind(&self, name: &str) -> Option<CurveKind> {
        self.binding(name).map(PropertyBinding::kind)
    }

    pub fn binding(&self, name: &str) -> Option<&PropertyBinding<S>> {
        self.index.get(name).map(|&i| &self.properties[i])
    }

    /// Curve of the `index`-th animated property, in activation order.
    pub fn property_animation(&self, index: usize) -> Option<CurveRef<'_>> {
        let idx = *self.animated.get(index)?;
        self.properties[idx].curve()
    }

    pub fn property_animation_mut(&mut self, index: usize) -> Option<CurveMut<'_>> {
        let idx = *self.animated.get(index)?;
        self.properties[idx].curve_mut()
    }

    /// Active curves in activation order.
    pub fn animations(&self) -> impl Iterator<Item = CurveRef<'_>> {
        self.animated
            .iter()
            .filter_map(|&idx| self.properties[idx].curve())
    }

    pub fn curve(&self, name: &str) -> Option<CurveRef<'_>> {
        self.binding(name)?.curve()
    }

    /// Typed access to the active curve of `name`, for editing states.
    pub fn curve_typed<T: Animatable>(&self, name: &str) -> Option<&Curve<T>> {
        T::typed(self.binding(name)?)?.curve()
    }

    pub fn curve_typed_mut<T: Animatable>(&mut self, name: &str) -> Option<&mut Curve<T>> {
        let idx = *self.index.get(name)?;
        T::typed_mut(&mut self.properties[idx])?.curve_mut()
    }

    /// Plot samples of the active curve of `name`, using the configured
    /// number of preview segments.
    pub fn curve_preview<T: Animatable>(&self, name: &str) -> Option<Vec<T>> {
        self.curve_typed::<T>(name)
            .map(|c| c.preview(self.cfg.preview_segments))
    }

    /// True iff the animator is enabled and `property_name` is animated. Hosts
    /// use this to reject direct edits of animation-controlled fields.
    pub fn is_driven(&self, property_name: &str) -> bool {
        self.clock.enabled()
            && self
                .binding(property_name)
                .is_some_and(PropertyBinding::is_activated)
    }

    // ----- playback -----

    #[inline]
    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.clock.enabled()
    }

    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.clock.set_enabled(enabled);
    }

    #[inline]
    pub fn paused(&self) -> bool {
        self.clock.paused()
    }

    #[inline]
    pub fn set_paused(&mut self, paused: bool) {
        self.clock.set_paused(paused);
    }

    #[inline]
    pub fn pause(&mut self) {
        self.clock.pause();
    }

    #[inline]
    pub fn resume(&mut self) {
        self.clock.resume();
    }

    #[inline]
    pub fn restart(&mut self) {
        self.clock.restart();
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    #[inline]
    pub fn animation_time(&self) -> f32 {
        self.clock.animation_time()
    }

    #[inline]
    pub fn set_animation_time(&mut self, value: f32) {
        self.clock.set_animation_time(value);
    }

    #[inline]
    pub fn current_time(&self) -> f32 {
        self.clock.current_time()
    }

    #[inline]
    pub fn set_current_time(&mut self, value: f32) {
        self.clock.set_current_time(value);
    }

    #[inline]
    pub fn animation_mode(&self) -> AnimationMode {
        self.clock.mode()
    }

    #[inline]
    pub fn set_animation_mode(&mut self, mode: AnimationMode) {
        self.clock.set_mode(mode);
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.clock.time_scale()
    }

    /// Per-frame tick: advance the clock by `delta_time` seconds, then write
    /// every active curve's value at the new time into `scene`, in activation
    /// order. Does nothing while disabled.
    pub fn update(&mut self, delta_time: f32, scene: &mut S) {
        if !self.clock.advance(delta_time) {
            return;
        }
        let time = self.clock.current_time();
        for &idx in &self.animated {
            self.properties[idx].update(time, scene);
        }
    }
}

impl<S> Default for Animator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for Animator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animator")
            .field("clock", &self.clock)
            .field("properties", &self.properties)
            .field("animated", &self.animated)
            .finish()
    }
}
