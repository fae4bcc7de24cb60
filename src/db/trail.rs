use crate::structures::literal::CLiteral;

/// A decision level, as the index on the trail of the decision together with whether the decision is the flip of some earlier decision.
#[derive(Clone, Copy, Debug)]
pub struct Level {
    pub start: usize,
    pub flipped: bool,
}

/// Assignments, in order, split into decision levels.
///
/// Assignments before the first level are fixed for the solve.
/// Assignments on the trail from `q_head` onwards are yet to be propagated.
#[derive(Default)]
pub struct Trail {
    pub literals: Vec<CLiteral>,
    pub levels: Vec<Level>,
    pub q_head: usize,
}

impl Trail {
    pub fn store_assignment(&mut self, literal: CLiteral) {
        self.literals.push(literal);
    }

    /// Opens a new level, with the next stored assignment as the decision of the level.
    pub fn open_level(&mut self, flipped: bool) {
        self.levels.push(Level {
            start: self.literals.len(),
            flipped,
        });
    }

    /// The next assignment to propagate, if any, advancing the head of the queue.
    pub fn next_to_propagate(&mut self) -> Option<CLiteral> {
        let literal = self.literals.get(self.q_head).copied();
        if literal.is_some() {
            self.q_head += 1;
        }
        literal
    }

    /// A count of the decisions currently made.
    pub fn decision_count(&self) -> usize {
        self.levels.len()
    }

    pub fn decision_is_made(&self) -> bool {
        !self.levels.is_empty()
    }

    /// Removes the top level, returning the level together with the assignments made on the level.
    ///
    /// # Soundness
    /// Does not clear the *valuation* of the assignments.
    pub fn forget_top_level(&mut self) -> Option<(Level, Vec<CLiteral>)> {
        let level = self.levels.pop()?;
        let assignments = self.literals.split_off(level.start);
        self.q_head = self.q_head.min(level.start);
        Some((level, assignments))
    }
}

#[cfg(test)]
mod trail_tests {
    use super::*;

    #[test]
    fn forgetting_a_level_rewinds_the_queue() {
        let mut trail = Trail::default();
        trail.store_assignment(CLiteral::new(0, true));
        trail.open_level(false);
        trail.store_assignment(CLiteral::new(1, false));
        trail.store_assignment(CLiteral::new(2, true));

        while trail.next_to_propagate().is_some() {}
        assert_eq!(trail.q_head, 3);

        let (level, assignments) = trail.forget_top_level().unwrap();
        assert_eq!(level.start, 1);
        assert!(!level.flipped);
        assert_eq!(assignments.len(), 2);
        assert_eq!(trail.q_head, 1);
        assert!(!trail.decision_is_made());
    }
}
