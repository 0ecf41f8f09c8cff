use super::Color;
use itertools::Itertools;
use serde::Serialize;

/// One question: the target color and the shuffled grid of options the
/// player picks from. Never mutated after generation.
#[readonly::make]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    pub target: Color,
    pub options: Vec<Color>,
}

impl Round {
    pub fn new(target: Color, options: Vec<Color>) -> Self {
        debug_assert!(options.contains(&target), "round options must include the target");
        Self { target, options }
    }

    pub fn is_target(&self, color: Color) -> bool {
        self.target == color
    }

    pub fn option(&self, index: usize) -> Option<Color> {
        self.options.get(index).copied()
    }

    /// Indices of every option that differs from the target by value.
    pub fn wrong_option_indices(&self) -> Vec<usize> {
        self.options
            .iter()
            .positions(|color| *color != self.target)
            .collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_option_indices() {
        let target = Color::new(10, 20, 30);
        let round = Round::new(
            target,
            vec![
                Color::new(11, 20, 30),
                target,
                Color::new(10, 22, 30),
                Color::new(9, 20, 31),
            ],
        );
        assert_eq!(round.wrong_option_indices(), vec![0, 2, 3]);
        assert!(round.is_target(Color::new(10, 20, 30)));
        assert_eq!(round.option(1), Some(target));
        assert_eq!(round.option(4), None);
    }

    #[test]
    fn test_decoy_equal_to_target_is_not_wrong() {
        let target = Color::new(0, 0, 0);
        let round = Round::new(target, vec![target, target, Color::new(1, 1, 1)]);
        assert_eq!(round.wrong_option_indices(), vec![2]);
    }
}
