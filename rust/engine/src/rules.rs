use serde::{Deserialize, Serialize};

use crate::errors::{DecodeError, GameError};

/// Deepest stack a table may use; both stacks together must fit in a pot.
pub const MAX_STACK: u32 = u32::MAX / 2;

/// Fixed table parameters shared by every hand played at one table.
///
/// The defaults match the common heads-up benchmark table: blinds of 50 and
/// 100 with 200 big blinds (20,000 chips) behind, reset after every hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandContext {
    pub stack_size: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub num_streets: u8,
}

impl Default for HandContext {
    fn default() -> Self {
        Self {
            stack_size: 20_000,
            small_blind: 50,
            big_blind: 100,
            num_streets: 4,
        }
    }
}

impl HandContext {
    /// Builds a context, rejecting tables the decoder cannot describe.
    ///
    /// # Examples
    ///
    /// ```
    /// use actline_engine::rules::HandContext;
    ///
    /// let ctx = HandContext::new(20_000, 50, 100, 4).unwrap();
    /// assert_eq!(ctx, HandContext::default());
    /// assert!(HandContext::new(20_000, 100, 50, 4).is_err());
    /// ```
    pub fn new(
        stack_size: u32,
        small_blind: u32,
        big_blind: u32,
        num_streets: u8,
    ) -> Result<Self, GameError> {
        if small_blind == 0 || small_blind > big_blind {
            return Err(GameError::InvalidBlinds {
                small: small_blind,
                big: big_blind,
            });
        }
        if stack_size <= big_blind {
            return Err(GameError::StackTooShort {
                stack: stack_size,
                big: big_blind,
            });
        }
        if stack_size > MAX_STACK {
            return Err(GameError::StackTooDeep {
                stack: stack_size,
                max: MAX_STACK,
            });
        }
        if num_streets == 0 || num_streets > 4 {
            return Err(GameError::InvalidStreets(num_streets));
        }
        Ok(Self {
            stack_size,
            small_blind,
            big_blind,
            num_streets,
        })
    }

    pub fn last_street(&self) -> u8 {
        self.num_streets - 1
    }
}

/// Smallest legal raise increment for the player about to bet.
///
/// The previous raise size sets the bar, floored at the big blind. A player
/// with fewer chips than that may still move all-in, so the result is capped
/// at `remaining`.
///
/// ```
/// use actline_engine::rules::{min_raise_size, HandContext};
///
/// let ctx = HandContext::default();
/// assert_eq!(min_raise_size(50, 19_900, &ctx), 100);
/// assert_eq!(min_raise_size(300, 19_500, &ctx), 300);
/// assert_eq!(min_raise_size(300, 120, &ctx), 120);
/// ```
pub fn min_raise_size(last_bet_size: u32, remaining: u32, ctx: &HandContext) -> u32 {
    last_bet_size.max(ctx.big_blind).min(remaining)
}

/// Validates a raise increment against the minimum and the chips behind.
///
/// `size` is signed because a malformed history may name a street total below
/// the current one.
pub fn validate_raise(
    size: i64,
    last_bet_size: u32,
    remaining: u32,
    ctx: &HandContext,
) -> Result<(), DecodeError> {
    let minimum = min_raise_size(last_bet_size, remaining, ctx);
    if size < i64::from(minimum) || size <= 0 {
        return Err(DecodeError::BetTooSmall { size, minimum });
    }
    if size > i64::from(remaining) {
        return Err(DecodeError::BetTooBig {
            size,
            maximum: remaining,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_must_leave_room_for_both_seats() {
        assert!(HandContext::new(MAX_STACK, 50, 100, 4).is_ok());
        assert_eq!(
            HandContext::new(4_000_000_000, 50, 100, 4),
            Err(GameError::StackTooDeep {
                stack: 4_000_000_000,
                max: MAX_STACK
            })
        );
    }

    #[test]
    fn open_raise_floor_is_big_blind() {
        let ctx = HandContext::default();
        assert!(validate_raise(100, 50, 19_900, &ctx).is_ok());
        assert_eq!(
            validate_raise(50, 50, 19_900, &ctx),
            Err(DecodeError::BetTooSmall {
                size: 50,
                minimum: 100
            })
        );
    }

    #[test]
    fn short_all_in_is_legal() {
        let ctx = HandContext::default();
        assert!(validate_raise(120, 300, 120, &ctx).is_ok());
        assert!(matches!(
            validate_raise(121, 300, 120, &ctx),
            Err(DecodeError::BetTooBig { maximum: 120, .. })
        ));
    }

    #[test]
    fn zero_raise_facing_all_in_is_rejected() {
        let ctx = HandContext::default();
        assert!(matches!(
            validate_raise(0, 19_900, 0, &ctx),
            Err(DecodeError::BetTooSmall { .. })
        ));
    }

    #[test]
    fn context_validation() {
        assert!(HandContext::new(20_000, 0, 100, 4).is_err());
        assert!(HandContext::new(100, 50, 100, 4).is_err());
        assert!(HandContext::new(20_000, 50, 100, 5).is_err());
        assert_eq!(HandContext::new(1_000, 5, 10, 2).unwrap().last_street(), 1);
    }
}
