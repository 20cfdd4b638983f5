use rand::Rng;

use crate::{GalaxyError, GalaxyParams, ParticleSet, generate_with_rng};

/// How a particle set is drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointStyle {
    pub size: f32,
}

impl PointStyle {
    pub fn read(params: &GalaxyParams) -> Self {
        Self {
            size: params.particle_size,
        }
    }
}

/// Renderer side of the hand-off. Implementations own whatever GPU/scene
/// resources a displayed set needs and must free all of them on `release`.
pub trait ParticleDisplay {
    type Drawable;

    fn attach(&mut self, set: ParticleSet, style: PointStyle) -> Self::Drawable;

    /// Disposes resources and detaches the drawable from the scene.
    /// An error here is unrecoverable for the galaxy being replaced.
    fn release(&mut self, drawable: Self::Drawable) -> Result<(), GalaxyError>;

    /// Swaps `old` for `set`. The old drawable is fully released before the
    /// new one is attached.
    fn replace(
        &mut self,
        old: Option<Self::Drawable>,
        set: ParticleSet,
        style: PointStyle,
    ) -> Result<Self::Drawable, GalaxyError> {
        if let Some(old) = old {
            self.release(old)?;
        }
        Ok(self.attach(set, style))
    }
}

/// Tracks the single particle set currently displayed for one galaxy
pub struct GalaxyInstance<D> {
    current: Option<D>,
}

impl<D> Default for GalaxyInstance<D> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<D> GalaxyInstance<D> {
    pub fn current(&self) -> Option<&D> {
        self.current.as_ref()
    }

    pub fn is_displayed(&self) -> bool {
        self.current.is_some()
    }

    /// Generates a new set from `params` and swaps it in.
    /// Invalid params are rejected before the displayed set is touched.
    pub fn regenerate<P, R>(
        &mut self,
        display: &mut P,
        params: &GalaxyParams,
        rng: &mut R,
    ) -> Result<&D, GalaxyError>
    where
        P: ParticleDisplay<Drawable = D>,
        R: Rng + ?Sized,
    {
        let set = generate_with_rng(params, rng)?;
        self.replace(display, set, PointStyle::read(params))
    }

    pub fn replace<P>(
        &mut self,
        display: &mut P,
        set: ParticleSet,
        style: PointStyle,
    ) -> Result<&D, GalaxyError>
    where
        P: ParticleDisplay<Drawable = D>,
    {
        // on failure the old drawable is gone either way
        let drawable = display.replace(self.current.take(), set, style)?;
        Ok(self.current.insert(drawable))
    }

    /// Releases the displayed set, if any
    pub fn clear<P>(&mut self, display: &mut P) -> Result<(), GalaxyError>
    where
        P: ParticleDisplay<Drawable = D>,
    {
        match self.current.take() {
            Some(drawable) => display.release(drawable),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::default;
    use rand::{SeedableRng, rngs::StdRng};

    #[derive(Debug, PartialEq)]
    enum Call {
        Attach(u32, usize),
        Release(u32),
    }

    /// Records every call and tracks what is on screen
    #[derive(Default)]
    struct RecordingDisplay {
        next_id: u32,
        calls: Vec<Call>,
        attached: Vec<u32>,
        fail_release: bool,
    }

    impl ParticleDisplay for RecordingDisplay {
        type Drawable = u32;

        fn attach(&mut self, set: ParticleSet, _style: PointStyle) -> u32 {
            let id = self.next_id;
            self.next_id += 1;
            self.calls.push(Call::Attach(id, set.len()));
            self.attached.push(id);
            id
        }

        fn release(&mut self, drawable: u32) -> Result<(), GalaxyError> {
            if self.fail_release {
                return Err(GalaxyError::Disposal(format!("drawable {drawable}")));
            }
            self.calls.push(Call::Release(drawable));
            self.attached.retain(|id| *id != drawable);
            Ok(())
        }
    }

    fn params(count: i32) -> GalaxyParams {
        GalaxyParams {
            particle_count: count,
            ..default()
        }
    }

    #[test]
    fn releases_previous_before_attaching() {
        let mut display = RecordingDisplay::default();
        let mut instance = GalaxyInstance::default();
        let mut rng = StdRng::seed_from_u64(10);

        instance.regenerate(&mut display, &params(100), &mut rng).unwrap();
        instance.regenerate(&mut display, &params(200), &mut rng).unwrap();
        instance.regenerate(&mut display, &params(50), &mut rng).unwrap();

        assert_eq!(
            display.calls,
            vec![
                Call::Attach(0, 100),
                Call::Release(0),
                Call::Attach(1, 200),
                Call::Release(1),
                Call::Attach(2, 50),
            ]
        );
        assert_eq!(display.attached, vec![2]);
        assert_eq!(instance.current(), Some(&2));
    }

    #[test]
    fn invalid_params_keep_current_set() {
        let mut display = RecordingDisplay::default();
        let mut instance = GalaxyInstance::default();
        let mut rng = StdRng::seed_from_u64(11);

        instance.regenerate(&mut display, &params(100), &mut rng).unwrap();

        let bad = GalaxyParams {
            branch_count: 0,
            ..params(100)
        };
        let err = instance.regenerate(&mut display, &bad, &mut rng).unwrap_err();
        assert_eq!(err, GalaxyError::InvalidBranchCount(0));

        assert_eq!(display.calls, vec![Call::Attach(0, 100)]);
        assert_eq!(instance.current(), Some(&0));
    }

    #[test]
    fn disposal_failure_is_propagated() {
        let mut display = RecordingDisplay::default();
        let mut instance = GalaxyInstance::default();
        let mut rng = StdRng::seed_from_u64(12);

        instance.regenerate(&mut display, &params(10), &mut rng).unwrap();
        display.fail_release = true;

        let err = instance.regenerate(&mut display, &params(10), &mut rng).unwrap_err();
        assert!(matches!(err, GalaxyError::Disposal(_)));
        // nothing new went on screen
        assert_eq!(display.calls, vec![Call::Attach(0, 10)]);
        assert!(!instance.is_displayed());
    }

    #[test]
    fn clear_releases_current() {
        let mut display = RecordingDisplay::default();
        let mut instance = GalaxyInstance::default();

        instance.clear(&mut display).unwrap();
        assert!(display.calls.is_empty());

        instance
            .replace(&mut display, ParticleSet::zeroed(4), PointStyle { size: 0.1 })
            .unwrap();
        instance.clear(&mut display).unwrap();
        assert_eq!(display.calls, vec![Call::Attach(0, 4), Call::Release(0)]);
        assert!(display.attached.is_empty());
    }
}
