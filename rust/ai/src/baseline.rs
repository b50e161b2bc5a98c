//! Reference deciders with no poker knowledge.

use crate::{Decider, DecisionView};
use actline_engine::encoder::Decision;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pot fractions the random decider picks its bet sizes from.
const BET_FRACTIONS: [f64; 4] = [0.5, 0.75, 1.0, 2.0];

/// Picks uniformly among fold / check-or-call / bet, whichever are legal.
///
/// Bets are a random pot fraction. Seeded runs are reproducible.
///
/// ```rust
/// use actline_ai::baseline::RandomAI;
/// use actline_ai::Decider;
///
/// let ai = RandomAI::new(Some(42));
/// assert_eq!(ai.name(), "RandomAI");
/// ```
#[derive(Debug, Clone)]
pub struct RandomAI {
    rng: ChaCha8Rng,
}

impl RandomAI {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Decider for RandomAI {
    fn decide(&mut self, view: &DecisionView<'_>) -> Decision {
        let legal = view.legal;
        let mut choices = Vec::with_capacity(3);
        if legal.fold {
            choices.push(Decision::Fold);
        }
        if legal.check || legal.call {
            choices.push(Decision::CheckOrCall);
        }
        if legal.bet.is_some() {
            let fraction = BET_FRACTIONS[self.rng.random_range(0..BET_FRACTIONS.len())];
            choices.push(Decision::BetPot(fraction));
        }
        if choices.is_empty() {
            return Decision::CheckOrCall;
        }
        choices[self.rng.random_range(0..choices.len())]
    }

    fn name(&self) -> &str {
        "RandomAI"
    }
}

/// Checks when it can, calls otherwise. Never folds or raises.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveAI;

impl Decider for PassiveAI {
    fn decide(&mut self, _view: &DecisionView<'_>) -> Decision {
        Decision::CheckOrCall
    }

    fn name(&self) -> &str {
        "PassiveAI"
    }
}
