//! Per-card magnification with exponential ease-out.
//!
//! Each card carries an emphasis level in `0.0..=1.0`.  The active card's
//! level rises toward 1, every other card decays toward 0.  While the
//! carousel has transitions suspended (during a continuity warp) levels
//! jump straight to their targets so a freshly warped-to card is already
//! magnified when it appears.

/// Per-card emphasis animator.
#[derive(Debug, Clone)]
pub struct Magnifier {
    levels: Vec<f64>,
    /// Easing: `level += (target - level) * speed` each tick.
    speed: f64,
}

impl Magnifier {
    pub fn new(count: usize, speed: f64) -> Self {
        Self {
            levels: vec![0.0; count],
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Advance one frame toward the state where only `active` is magnified.
    pub fn tick(&mut self, active: Option<usize>, transitions_enabled: bool) {
        for (i, level) in self.levels.iter_mut().enumerate() {
            let target = if Some(i) == active { 1.0 } else { 0.0 };
            if !transitions_enabled {
                *level = target;
                continue;
            }
            *level += (target - *level) * self.speed;
            if (target - *level).abs() < 0.02 {
                *level = target;
            }
        }
    }

    pub fn level(&self, index: usize) -> f64 {
        self.levels.get(index).copied().unwrap_or(0.0)
    }

    /// Extra rows a card gains at its current level, out of `max_rows`.
    pub fn extra_rows(&self, index: usize, max_rows: u16) -> u16 {
        (self.level(index) * f64::from(max_rows)).round() as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_active_card_up_and_others_down() {
        let mut m = Magnifier::new(3, 0.5);
        m.tick(Some(1), true);
        assert_eq!(m.level(1), 0.5);
        assert_eq!(m.level(0), 0.0);

        for _ in 0..10 {
            m.tick(Some(1), true);
        }
        assert_eq!(m.level(1), 1.0);
        assert_eq!(m.extra_rows(1, 2), 2);

        m.tick(Some(2), true);
        assert_eq!(m.level(1), 0.5);
        assert_eq!(m.level(2), 0.5);
    }

    #[test]
    fn suspended_transitions_jump_to_target() {
        let mut m = Magnifier::new(3, 0.3);
        m.tick(Some(0), true);
        m.tick(Some(2), false);
        assert_eq!(m.level(0), 0.0);
        assert_eq!(m.level(2), 1.0);
        assert_eq!(m.extra_rows(2, 2), 2);
        assert_eq!(m.extra_rows(7, 2), 0);
    }
}
