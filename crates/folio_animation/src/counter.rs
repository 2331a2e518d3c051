//! Numeric counter animation
//!
//! Counts a displayed integer from 0 up to a target in a fixed number of
//! equal steps. Intermediate values are `floor(target * step / steps)`, and
//! the final step shows the target exactly, so the display never overshoots.
//! Targets at or below zero are shown immediately on the first step.

/// Output of one counter step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    /// The counter reached its target and needs no further steps
    pub finished: bool,
}

/// Stepwise count from 0 to a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterAnimation {
    target: i64,
    steps: u32,
    step: u32,
}

impl CounterAnimation {
    /// A counter reaching `target` after `steps` updates (at least one)
    pub fn new(target: i64, steps: u32) -> Self {
        Self {
            target,
            steps: steps.max(1),
            step: 0,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    /// Number of steps taken so far
    pub fn steps_taken(&self) -> u32 {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.steps || (self.step > 0 && self.target <= 0)
    }

    /// Advance one step; `None` once finished
    pub fn step(&mut self) -> Option<CounterFrame> {
        if self.is_finished() {
            return None;
        }
        self.step += 1;

        if self.target <= 0 || self.step >= self.steps {
            return Some(CounterFrame {
                value: self.target,
                finished: true,
            });
        }

        let value = i128::from(self.target) * i128::from(self.step) / i128::from(self.steps);
        Some(CounterFrame {
            // |value| < |target| here, so it fits back into i64
            value: value as i64,
            finished: false,
        })
    }
}

/// Parse a counter annotation the way `parseInt(value, 10)` reads it
///
/// Leading whitespace and an optional sign are accepted, and parsing stops at
/// the first non-digit (`"12+"` is 12, `"3.9"` is 3). Returns `None` when no
/// digit follows, or when the number does not fit in an `i64`.
pub fn parse_count(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
