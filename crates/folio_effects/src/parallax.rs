//! Hero background parallax

use folio_core::{EffectsConfig, Query, ViewBinding, BACKGROUND_POSITION_Y};

/// Moves the hero background slower than the page
#[derive(Debug, Clone)]
pub struct ParallaxShifter {
    hero: Query,
    factor: f64,
}

impl ParallaxShifter {
    pub fn new(config: &EffectsConfig) -> Self {
        Self {
            hero: Query::class(&config.selectors.hero_class),
            factor: config.parallax.factor,
        }
    }

    /// Background offset for a scroll position
    pub fn shift_for(&self, scroll_y: f64) -> f64 {
        scroll_y * self.factor
    }

    /// Returns the applied shift, or `None` without a hero element
    pub fn on_scroll<V: ViewBinding>(&self, view: &mut V) -> Option<f64> {
        let hero = view.query_first(&self.hero)?;
        let shift = self.shift_for(view.scroll_y());
        view.set_style(&hero, BACKGROUND_POSITION_Y, &format!("{shift}px"));
        Some(shift)
    }
}
