/// A configurable value, together with its name and the (inclusive) bounds of valid values.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: Clone + PartialOrd> ConfigOption<T> {
    pub fn min_max(&self) -> (T, T) {
        (self.min.clone(), self.max.clone())
    }

    /// Sets the value of the option to `value`, if `value` is within bounds.
    ///
    /// Returns false (and leaves the option unchanged) otherwise.
    pub fn set(&mut self, value: T) -> bool {
        if self.min <= value && value <= self.max {
            self.value = value;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod config_option_tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let mut option = ConfigOption {
            name: "lean",
            min: 0.0,
            max: 1.0,
            value: 0.5,
        };

        assert!(option.set(1.0));
        assert_eq!(option.value, 1.0);
        assert!(!option.set(1.5));
        assert_eq!(option.value, 1.0);
        assert!(option.set(0.0));
    }
}
