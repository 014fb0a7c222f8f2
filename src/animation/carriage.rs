//! Carriage motion
//!
//! The paper-holding assembly shifts opposite to the cursor advance -
//! one character width per printed glyph - and springs home on a
//! return. Rendered motion chases the target with the same exponential
//! smoothing the type bars use, independent of the strike timing.

/// Horizontal offset of the carriage. Zero is home; printing pulls the
/// target negative down to the line's full travel.
#[derive(Clone, Copy, Debug)]
pub struct Carriage {
    current_x: f32,
    target_x: f32,
    min_x: f32,
}

impl Carriage {
    /// `travel` is the usable line width; the carriage never moves
    /// further than that from home.
    pub fn new(travel: f32) -> Self {
        Self {
            current_x: 0.0,
            target_x: 0.0,
            min_x: -travel.abs(),
        }
    }

    pub fn current(&self) -> f32 {
        self.current_x
    }

    pub fn target(&self) -> f32 {
        self.target_x
    }

    /// Shift the target, clamped to the travel range
    pub fn nudge(&mut self, dx: f32) {
        self.target_x = (self.target_x + dx).clamp(self.min_x, 0.0);
    }

    /// Carriage return: spring the target back to home
    pub fn return_home(&mut self) {
        self.target_x = 0.0;
    }

    /// Swap in a new travel range after a reflow
    pub fn set_travel(&mut self, travel: f32) {
        self.min_x = -travel.abs();
        self.target_x = self.target_x.clamp(self.min_x, 0.0);
    }

    /// Hard reset, for session reset (no spring-back animation)
    pub fn reset(&mut self) {
        self.current_x = 0.0;
        self.target_x = 0.0;
    }

    /// One smoothing step toward the target
    pub fn ease(&mut self, k: f32) {
        self.current_x += (self.target_x - self.current_x) * k;
        if (self.target_x - self.current_x).abs() < 1e-3 {
            self.current_x = self.target_x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nudge_accumulates_and_clamps() {
        let mut carriage = Carriage::new(30.0);
        for _ in 0..5 {
            carriage.nudge(-12.0);
        }
        assert_eq!(carriage.target(), -30.0);
    }

    #[test]
    fn test_return_home_resets_target_only() {
        let mut carriage = Carriage::new(100.0);
        carriage.nudge(-50.0);
        carriage.ease(0.5);
        let mid_flight = carriage.current();

        carriage.return_home();
        assert_eq!(carriage.target(), 0.0);
        assert_eq!(carriage.current(), mid_flight);
    }

    #[test]
    fn test_ease_settles_at_target() {
        let mut carriage = Carriage::new(100.0);
        carriage.nudge(-40.0);
        for _ in 0..60 {
            carriage.ease(0.25);
        }
        assert_eq!(carriage.current(), -40.0);
    }
}
