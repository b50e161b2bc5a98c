use std::collections::{HashSet, VecDeque};

use actline_engine::decoder::{decode, decode_with_log};
use actline_engine::encoder::{encode, sanitize, Decision};
use actline_engine::legality::{legal_actions, Commitments};
use actline_engine::player::Action;
use actline_engine::rules::HandContext;

const DECISIONS: [Decision; 7] = [
    Decision::Fold,
    Decision::CheckOrCall,
    Decision::BetPot(0.0),
    Decision::BetPot(0.5),
    Decision::BetPot(1.0),
    Decision::BetTo(5_000),
    Decision::BetTo(u32::MAX),
];

/// Appends `action` the way the remote side would, closing a finished street
/// with a slash.
fn extend(history: &str, action: Action, ctx: &HandContext) -> String {
    let before = decode(history, ctx).unwrap();
    let mut next = format!("{}{}", history, action);
    if let Ok(after) = decode(&next, ctx) {
        if after.street > before.street && !after.is_terminal() {
            next.push('/');
        }
    }
    next
}

fn explore(ctx: &HandContext, depth: usize, mut visit: impl FnMut(&str)) {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([(String::new(), 0)]);
    while let Some((history, d)) = queue.pop_front() {
        if !seen.insert(history.clone()) {
            continue;
        }
        visit(&history);
        if d == depth {
            continue;
        }
        let (state, log) = decode_with_log(&history, ctx).unwrap();
        let Some(actor) = state.to_act else {
            continue;
        };
        let commitments = Commitments::from_log(&log, ctx);
        let legal = legal_actions(&state, actor, &commitments, ctx);
        for decision in DECISIONS {
            let decision = sanitize(decision, &legal);
            let token = encode(decision, &state, &commitments, ctx);
            assert!(
                legal.contains(&token),
                "{:?} encoded to {} outside {} after {:?}",
                decision,
                token,
                legal,
                history
            );
            let next = extend(&history, token, ctx);
            assert!(
                decode(&next, ctx).is_ok(),
                "{:?} after {:?} gave {:?}: {:?}",
                decision,
                history,
                next,
                decode(&next, ctx)
            );
            queue.push_back((next, d + 1));
        }
    }
}

#[test]
fn encoded_tokens_always_decode() {
    let ctx = HandContext::default();
    let mut count = 0;
    explore(&ctx, 5, |_| count += 1);
    assert!(count > 100);
}

#[test]
fn encoded_tokens_always_decode_short_stacks() {
    let ctx = HandContext::new(1_000, 50, 100, 4).unwrap();
    explore(&ctx, 6, |_| {});
}

#[test]
fn legal_sets_never_mix_check_and_call() {
    let ctx = HandContext::default();
    explore(&ctx, 4, |history| {
        let (state, log) = decode_with_log(history, &ctx).unwrap();
        let Some(actor) = state.to_act else {
            return;
        };
        let legal = legal_actions(&state, actor, &Commitments::from_log(&log, &ctx), &ctx);
        assert!(!(legal.check && legal.call), "{:?}", history);
        if state.last_bet_size == 0 {
            assert!(!legal.fold, "{:?}", history);
        }
        assert!(!legal.is_empty());
    });
}
