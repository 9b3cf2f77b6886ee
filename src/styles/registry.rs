use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, TimelineError};
use crate::styles::{BounceMix, ChaosOrbit, Ease, ScatterSwirl, ShuffleMotion, ShuffleStyle, SpiralChaos};

/// Nominal duration every built-in style declares
const BUILTIN_DURATION: f64 = 7.0;

type MotionFactory = Box<dyn Fn() -> Box<dyn ShuffleMotion> + Send + Sync>;

/// Registry of available shuffle styles
///
/// Styles are registered by id. Registration order is kept so that a seeded
/// random pick is reproducible.
pub struct StyleRegistry {
    styles: HashMap<String, (MotionFactory, f64, Ease)>,
    order: Vec<String>,
}

impl StyleRegistry {
    /// Create a new style registry with all built-in styles
    pub fn new() -> Self {
        let mut registry = Self {
            styles: HashMap::new(),
            order: Vec::new(),
        };

        registry.register("chaos_orbit", BUILTIN_DURATION, Ease::Linear, || Box::new(ChaosOrbit));
        registry.register("scatter_swirl", BUILTIN_DURATION, Ease::Linear, || Box::new(ScatterSwirl));
        registry.register("bounce_mix", BUILTIN_DURATION, Ease::Linear, || Box::new(BounceMix));
        registry.register("spiral_chaos", BUILTIN_DURATION, Ease::Linear, || Box::new(SpiralChaos));
        registry
    }

    /// Register a custom style, replacing any style with the same id
    pub fn register<F>(&mut self, id: &str, duration: f64, ease: Ease, factory: F)
    where
        F: Fn() -> Box<dyn ShuffleMotion> + Send + Sync + 'static,
    {
        if !self.styles.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.styles.insert(id.to_string(), (Box::new(factory), duration, ease));
    }

    /// Get a style by id
    pub fn get_style(&self, id: &str) -> Option<ShuffleStyle> {
        self.styles
            .get(id)
            .map(|(factory, duration, ease)| ShuffleStyle::new(factory(), *duration, *ease))
    }

    /// Like `get_style`, failing with a timeline error for unknown ids
    pub fn require(&self, id: &str) -> Result<ShuffleStyle> {
        self.get_style(id)
            .ok_or_else(|| TimelineError::UnknownShuffleStyle { name: id.to_string() }.into())
    }

    /// Uniformly pick one registered style
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ShuffleStyle> {
        let id = self
            .order
            .choose(rng)
            .ok_or_else(|| TimelineError::UnknownShuffleStyle { name: "<empty registry>".to_string() })?;
        self.require(id)
    }

    /// Style ids in registration order
    pub fn available_styles(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn has_style(&self, id: &str) -> bool {
        self.styles.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_builtin_styles_available() {
        let registry = StyleRegistry::new();
        assert_eq!(
            registry.available_styles(),
            vec!["chaos_orbit", "scatter_swirl", "bounce_mix", "spiral_chaos"]
        );
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_get_style() {
        let registry = StyleRegistry::new();
        let style = registry.get_style("bounce_mix").unwrap();
        assert_eq!(style.id, "bounce_mix");
        assert_eq!(style.name, "튀어오름 섞기");
        assert_eq!(style.duration, 7.0);
        assert_eq!(style.ease, Ease::Linear);

        assert!(registry.get_style("riffle").is_none());
        assert!(registry.require("riffle").is_err());
    }

    #[test]
    fn test_seeded_pick_is_reproducible() {
        let registry = StyleRegistry::new();
        let a = registry.pick_random(&mut SmallRng::seed_from_u64(11)).unwrap();
        let b = registry.pick_random(&mut SmallRng::seed_from_u64(11)).unwrap();
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_custom_style_registration() {
        let mut registry = StyleRegistry::new();
        registry.register("slow_orbit", 3.0, Ease::InOutQuad, || Box::new(ChaosOrbit));

        assert!(registry.has_style("slow_orbit"));
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get_style("slow_orbit").unwrap().ease, Ease::InOutQuad);
    }

    #[test]
    fn test_linear_time_matches_frame_clock() {
        let style = StyleRegistry::new().get_style("chaos_orbit").unwrap();
        assert!((style.time_at(15, 45, 30) - 0.5).abs() < 1e-9);
        assert_eq!(style.time_at(0, 1, 30), 0.0);
    }
}
