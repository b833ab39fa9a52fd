use serde::{Deserialize, Serialize};

use crate::player::PlayerAction as A;

/// Action after clamping against the table situation. This is what the state
/// machine actually applies and records.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatedAction {
    Fold,
    /// Call with nothing owed
    Check,
    /// Call paying the given amount (may be all-in for less)
    Call(u32),
    /// Raise to street level `to`, adding `added` chips from the stack
    Raise { to: u32, added: u32 },
}

/// Smallest legal raise target: `max_bet + max(last_raise, big_blind)`.
pub fn min_raise_target(max_bet: u32, last_raise: u32, big_blind: u32) -> u32 {
    max_bet.saturating_add(last_raise.max(big_blind))
}

/// Clamps a requested action into a [`ValidatedAction`].
///
/// Illegal amounts are never rejected:
/// - a raise below the minimum target is promoted to the minimum,
/// - a raise the stack cannot push past the current bet degrades to a call,
/// - a raise beyond the stack becomes an all-in for the whole stack.
///
/// # Arguments
///
/// * `stack` - Player's remaining chips
/// * `bet` - Player's chips already in on this street
/// * `max_bet` - Highest street bet at the table
/// * `min_target` - Result of [`min_raise_target`]
/// * `action` - The requested action
///
/// # Examples
///
/// ```
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::rules::{resolve_action, ValidatedAction};
///
/// // facing 40 with a 20 increment: raise to 45 is promoted to 60
/// let v = resolve_action(1000, 0, 40, 60, PlayerAction::Raise { to: 45 });
/// assert_eq!(v, ValidatedAction::Raise { to: 60, added: 60 });
///
/// // short stack cannot raise at all: becomes an all-in call
/// let v = resolve_action(30, 0, 40, 60, PlayerAction::Raise { to: 100 });
/// assert_eq!(v, ValidatedAction::Call(30));
/// ```
pub fn resolve_action(
    stack: u32,
    bet: u32,
    max_bet: u32,
    min_target: u32,
    action: A,
) -> ValidatedAction {
    let owed = max_bet.saturating_sub(bet);
    match action {
        A::Fold => ValidatedAction::Fold,
        A::Call => {
            if owed == 0 {
                ValidatedAction::Check
            } else {
                ValidatedAction::Call(owed.min(stack))
            }
        }
        A::Raise { to } => {
            if stack <= owed {
                return resolve_action(stack, bet, max_bet, min_target, A::Call);
            }
            let target = to.max(min_target);
            let added = target.saturating_sub(bet).min(stack);
            ValidatedAction::Raise {
                to: bet + added,
                added,
            }
        }
    }
}
