//! Playing one hand through a [`Transport`].
//!
//! Each response carries the whole history so far. The loop decodes it from
//! scratch, shows the decider what the opponent just did, works out what the
//! client may do, and sends back exactly one wire token, until the dealer
//! reports winnings.

use actline_ai::{Decider, DecisionView};
use actline_engine::cards::street_for_board;
use actline_engine::decoder::{decode_with_log, BettingState, Terminal};
use actline_engine::diff::opponent_actions;
use actline_engine::encoder::{encode, sanitize};
use actline_engine::legality::{legal_actions, Commitments};
use actline_engine::logger::HandRecord;
use actline_engine::player::Position;
use actline_engine::rules::HandContext;

use crate::error::SessionError;
use crate::transport::{HandResponse, Transport};

/// How one hand ended for the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandOutcome {
    pub client_pos: Position,
    /// Chips won, negative when lost
    pub winnings: i64,
    /// Final cumulative history as the dealer reported it
    pub history: String,
    /// The opponent gave up the pot by folding
    pub opponent_folded: bool,
    /// Ready-to-log record; `hand_id` is left empty for the writer to fill
    pub record: HandRecord,
}

/// Plays a single hand to completion.
///
/// `token` is handed to the transport unchanged and replaced whenever a
/// response carries a new one, so it survives across hands.
///
/// # Errors
///
/// Any transport failure, a history that does not decode, or a history that
/// is not over yet but leaves the client nothing to do. The hand is abandoned
/// in every case; callers log it and move on.
pub fn play_hand<T: Transport + ?Sized>(
    transport: &mut T,
    decider: &mut dyn Decider,
    ctx: &HandContext,
    token: &mut Option<String>,
) -> Result<HandOutcome, SessionError> {
    let mut response = transport.new_hand(token.as_deref())?;
    adopt_token(token, &response);
    let client_pos = Position::from_index(response.client_pos)?;
    decider.new_hand(client_pos);
    tracing::debug!(client_pos = %client_pos, decider = decider.name(), "hand started");

    let mut commitments = Commitments::posted(ctx);
    let mut observed = 0usize;
    let mut previous = String::new();
    let mut last_sent = String::new();
    let mut hole_cards = response.hole_cards.clone();

    loop {
        if !response.hole_cards.is_empty() {
            hole_cards.clone_from(&response.hole_cards);
        }
        if let Some(winnings) = response.winnings {
            return Ok(settle(client_pos, winnings, hole_cards, response, ctx));
        }

        let history = response.action.clone();
        let (state, log) = decode_with_log(&history, ctx).map_err(|source| {
            tracing::warn!(history = %history, error = %source, "undecodable history, skipping hand");
            SessionError::Decode {
                history: history.clone(),
                source,
            }
        })?;

        check_board(&state, &response);

        let opponent = opponent_actions(&previous, &history, &last_sent).map_err(|source| {
            SessionError::Decode {
                history: history.clone(),
                source,
            }
        })?;
        if !opponent.is_empty() {
            tracing::debug!(history = %history, opponent = ?opponent, "opponent acted");
            decider.observe_opponent(&opponent);
        }
        match log.get(observed..) {
            Some(fresh) => commitments.observe(fresh),
            // history was rewritten rather than extended
            None => commitments = Commitments::from_log(&log, ctx),
        }
        observed = log.len();

        if state.to_act != Some(client_pos) {
            tracing::warn!(history = %history, client_pos = %client_pos, "no decision pending for the client");
            return Err(SessionError::NotClientTurn { history });
        }

        let legal = legal_actions(&state, client_pos, &commitments, ctx);
        let view = DecisionView {
            state: &state,
            legal: &legal,
            commitments: &commitments,
            position: client_pos,
            hole_cards: &hole_cards,
            board: &response.board,
        };
        let decision = sanitize(decider.decide(&view), &legal);
        let incr = encode(decision, &state, &commitments, ctx).to_string();
        tracing::debug!(history = %history, legal = %legal, decision = ?decision, incr = %incr, "client acts");

        previous = history;
        last_sent.clone_from(&incr);
        response = transport.act(token.as_deref(), &incr)?;
        adopt_token(token, &response);
    }
}

/// Warns when the dealt board does not belong to the decoded street.
fn check_board(state: &BettingState, response: &HandResponse) {
    if response.board.is_empty() {
        return;
    }
    let dealt = street_for_board(response.board.len());
    if dealt != state.street_name() {
        tracing::warn!(
            history = %response.action,
            board = response.board.len(),
            street = ?state.street_name(),
            "board does not match the decoded street"
        );
    }
}

fn adopt_token(token: &mut Option<String>, response: &HandResponse) {
    if let Some(new_token) = &response.token {
        *token = Some(new_token.clone());
    }
}

/// Builds the outcome once the dealer has reported winnings.
fn settle(
    client_pos: Position,
    winnings: i64,
    hole_cards: Vec<actline_engine::cards::Card>,
    response: HandResponse,
    ctx: &HandContext,
) -> HandOutcome {
    // the dealer may close the final street with a delimiter the decoder
    // does not expect after a fold
    let (terminal, opponent_folded) =
        match decode_with_log(response.action.trim_end_matches('/'), ctx) {
            Ok((state, log)) => {
                let folded = state.terminal == Some(Terminal::Fold)
                    && log
                        .last()
                        .is_some_and(|r| r.position == client_pos.opponent());
                (state.terminal, folded)
            }
            Err(e) => {
                tracing::debug!(history = %response.action, error = %e, "final history not decodable");
                (None, false)
            }
        };
    tracing::debug!(client_pos = %client_pos, winnings, terminal = ?terminal, "hand finished");

    let record = HandRecord {
        hand_id: String::new(),
        client_pos,
        history: response.action.clone(),
        hole_cards,
        board: response.board,
        opponent_hole_cards: response.bot_hole_cards,
        winnings,
        terminal,
        ts: None,
    };
    HandOutcome {
        client_pos,
        winnings,
        history: response.action,
        opponent_folded,
        record,
    }
}
