//! Replaying the client's side of a recorded hand.

use std::collections::VecDeque;

use crate::{Decider, DecisionView};
use actline_engine::encoder::Decision;
use actline_engine::player::Action;

/// Plays back recorded client tokens in order.
///
/// Each token becomes the decision that reproduces it: fold, check-or-call,
/// or a bet to the recorded street total. Once the recording runs out the
/// decider checks or calls.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAI {
    queue: VecDeque<Action>,
}

impl ScriptedAI {
    pub fn new<I: IntoIterator<Item = Action>>(actions: I) -> Self {
        Self {
            queue: actions.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl Decider for ScriptedAI {
    fn decide(&mut self, _view: &DecisionView<'_>) -> Decision {
        match self.queue.pop_front() {
            Some(Action::Fold) => Decision::Fold,
            Some(Action::Bet(to)) => Decision::BetTo(to),
            Some(Action::Check | Action::Call) | None => Decision::CheckOrCall,
        }
    }

    fn name(&self) -> &str {
        "ScriptedAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actline_engine::decoder::BettingState;
    use actline_engine::legality::{Commitments, LegalActionSet};
    use actline_engine::player::Position;
    use actline_engine::rules::HandContext;

    #[test]
    fn plays_back_in_order_then_checks() {
        let ctx = HandContext::default();
        let state = BettingState::posted(&ctx);
        let legal = LegalActionSet::default();
        let commitments = Commitments::posted(&ctx);
        let view = DecisionView {
            state: &state,
            legal: &legal,
            commitments: &commitments,
            position: Position::Button,
            hole_cards: &[],
            board: &[],
        };
        let mut ai = ScriptedAI::new([Action::Bet(300), Action::Fold]);
        assert_eq!(ai.decide(&view), Decision::BetTo(300));
        assert_eq!(ai.remaining(), 1);
        assert_eq!(ai.decide(&view), Decision::Fold);
        assert_eq!(ai.decide(&view), Decision::CheckOrCall);
    }
}
