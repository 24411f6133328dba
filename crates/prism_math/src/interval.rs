/// A closed range `[min, max]` of ray parameters or coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `[min, +inf)`, the usual range for secondary rays.
    pub fn from_min(min: f32) -> Self {
        Self::new(min, f32::INFINITY)
    }

    /// Same lower bound, new upper bound. Used to shrink the search range
    /// to the closest hit found so far.
    pub fn with_max(&self, max: f32) -> Self {
        Self::new(self.min, max)
    }

    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        !(self.min <= self.max)
    }

    /// Inclusive membership test.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Exclusive membership test.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Grows the interval by `delta / 2` on each side.
    pub fn expand(&self, delta: f32) -> Interval {
        let padding = delta / 2.0;
        Interval::new(self.min - padding, self.max + padding)
    }

    /// Smallest interval containing both `a` and `b`.
    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }

    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let range = Interval::new(0.0, 4.0);
        assert!(range.contains(0.0));
        assert!(range.contains(4.0));
        assert!(!range.contains(4.001));
        assert!(!range.contains(-0.001));
    }

    #[test]
    fn test_surrounds_is_exclusive() {
        let range = Interval::new(0.0, 4.0);
        assert!(!range.surrounds(0.0));
        assert!(!range.surrounds(4.0));
        assert!(range.surrounds(2.0));
    }

    #[test]
    fn test_with_max_keeps_lower_bound() {
        let range = Interval::from_min(0.001).with_max(7.5);
        assert_eq!(range.min, 0.001);
        assert_eq!(range.max, 7.5);
    }

    #[test]
    fn test_expand_and_surrounding() {
        let grown = Interval::new(1.0, 3.0).expand(1.0);
        assert_eq!(grown, Interval::new(0.5, 3.5));

        let union = Interval::surrounding(&Interval::new(-2.0, 0.0), &Interval::new(1.0, 5.0));
        assert_eq!(union, Interval::new(-2.0, 5.0));
    }

    #[test]
    fn test_empty_and_universe() {
        assert!(Interval::EMPTY.is_empty());
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(!Interval::UNIVERSE.is_empty());
        assert!(Interval::UNIVERSE.contains(-1e30));
        assert_eq!(Interval::surrounding(&Interval::EMPTY, &Interval::new(1.0, 2.0)), Interval::new(1.0, 2.0));
    }

    #[test]
    fn test_clamp() {
        let unit = Interval::new(0.0, 0.999);
        assert_eq!(unit.clamp(-3.0), 0.0);
        assert_eq!(unit.clamp(0.5), 0.5);
        assert_eq!(unit.clamp(2.0), 0.999);
    }
}
