/// Sections that fade in after load, in stagger order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealTarget {
    Heading,
    Lead,
    Meta,
    Skills,
    Actions,
    Photo,
}

pub const REVEAL_ORDER: [RevealTarget; 6] = [
    RevealTarget::Heading,
    RevealTarget::Lead,
    RevealTarget::Meta,
    RevealTarget::Skills,
    RevealTarget::Actions,
    RevealTarget::Photo,
];

impl RevealTarget {
    pub fn index(self) -> usize {
        REVEAL_ORDER
            .iter()
            .position(|target| *target == self)
            .unwrap_or(REVEAL_ORDER.len())
    }

    /// `revealed` counts how many targets have been shown so far.
    pub fn classes(self, revealed: usize) -> &'static str {
        if self.index() < revealed {
            "fade-in show"
        } else {
            "fade-in"
        }
    }
}

/// Absolute delay (ms after load) at which each target becomes visible.
pub fn reveal_delays(count: usize, step_ms: u32) -> Vec<u32> {
    (0..count)
        .map(|index| step_ms.saturating_mul(index as u32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_grow_by_step() {
        assert_eq!(reveal_delays(4, 80), vec![0, 80, 160, 240]);
    }

    #[test]
    fn targets_show_once_their_turn_passed() {
        assert_eq!(RevealTarget::Heading.classes(0), "fade-in");
        assert_eq!(RevealTarget::Heading.classes(1), "fade-in show");
        assert_eq!(RevealTarget::Photo.classes(5), "fade-in");
        assert_eq!(RevealTarget::Photo.classes(REVEAL_ORDER.len()), "fade-in show");
    }
}
