//! Input parsing for the interactive table.
//!
//! Parsing is pure: it never looks at the hand. Amounts are checked against
//! the table by the engine, which clamps whatever it is given.

use holdem_engine::player::PlayerAction;

use crate::bankroll::BankrollOption;

/// Outcome of parsing one line typed at the action prompt.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid player action parsed from input
    Action(PlayerAction),
    /// Shove the whole stack; the driver turns this into a raise target
    AllIn,
    /// Ask the coach
    Hint,
    /// Top up to the maximum buy-in once the hand is over
    TopUp,
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input string into a PlayerAction or special commands.
///
/// Accepts the following input formats (case-insensitive):
/// - "f" or "fold" → Fold
/// - "c", "call", "k" or "check" → Call (checks when nothing is owed)
/// - "r N" or "raise N" → raise to a street total of N
/// - "a", "allin" or "all-in" → all-in
/// - "h" or "hint" → coach advice
/// - "t" or "topup" → top up before the next hand
/// - "q" or "quit" → Quit command
///
/// ```rust
/// # use holdem_cli::validation::{parse_player_action, ParseResult};
/// use holdem_engine::player::PlayerAction;
///
/// assert_eq!(parse_player_action("fold"), ParseResult::Action(PlayerAction::Fold));
/// assert_eq!(
///     parse_player_action("r 60"),
///     ParseResult::Action(PlayerAction::Raise { to: 60 })
/// );
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
///
/// match parse_player_action("invalid") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&first) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match first {
        "q" | "quit" => ParseResult::Quit,
        "h" | "hint" => ParseResult::Hint,
        "t" | "topup" | "top-up" => ParseResult::TopUp,
        "fold" | "f" => ParseResult::Action(PlayerAction::Fold),
        "check" | "k" | "call" | "c" => ParseResult::Action(PlayerAction::Call),
        "allin" | "all-in" | "a" => ParseResult::AllIn,
        "raise" | "r" | "bet" | "b" => {
            let Some(amount) = parts.get(1) else {
                return ParseResult::Invalid(
                    "Raise requires a target (e.g., 'r 60')".to_string(),
                );
            };
            match amount.parse::<u32>() {
                Ok(to) if to > 0 => ParseResult::Action(PlayerAction::Raise { to }),
                Ok(_) => ParseResult::Invalid("Raise target must be positive".to_string()),
                Err(_) => ParseResult::Invalid("Invalid raise amount".to_string()),
            }
        }
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, call, check, raise <to>, allin, hint, topup, q",
            first
        )),
    }
}

/// Answer to the between-hands bankroll prompt.
#[derive(Debug, PartialEq)]
pub enum BankrollChoice {
    Take(BankrollOption),
    /// Empty line: keep the current stack
    Skip,
    Quit,
    Invalid(String),
}

/// Parses a bankroll answer against the options on offer. Options can be
/// picked by their 1-based number, `topup`, or `rebuy <amount>`.
pub fn parse_bankroll_choice(input: &str, options: &[BankrollOption]) -> BankrollChoice {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&first) = parts.first() else {
        return BankrollChoice::Skip;
    };

    let picked = match first {
        "q" | "quit" => return BankrollChoice::Quit,
        "topup" | "top-up" | "t" => options
            .iter()
            .copied()
            .find(|o| matches!(o, BankrollOption::TopUp { .. })),
        "rebuy" => match parts.get(1).map(|s| s.parse::<u32>()) {
            Some(Ok(amount)) => options
                .iter()
                .copied()
                .find(|o| *o == BankrollOption::Rebuy(amount)),
            Some(Err(_)) => return BankrollChoice::Invalid("Invalid rebuy amount".to_string()),
            // a bare "rebuy" takes the only rebuy on offer
            None => {
                let rebuys: Vec<BankrollOption> = options
                    .iter()
                    .copied()
                    .filter(|o| matches!(o, BankrollOption::Rebuy(_)))
                    .collect();
                match rebuys.as_slice() {
                    [only] => Some(*only),
                    _ => {
                        return BankrollChoice::Invalid(
                            "Pick a rebuy amount (e.g., 'rebuy 1000')".to_string(),
                        );
                    }
                }
            }
        },
        n => match n.parse::<usize>() {
            Ok(k) if k >= 1 => options.get(k - 1).copied(),
            _ => {
                return BankrollChoice::Invalid(format!("Unrecognized choice '{}'", first));
            }
        },
    };

    match picked {
        Some(BankrollOption::Eliminated) | None => {
            BankrollChoice::Invalid("That option is not available".to_string())
        }
        Some(option) => BankrollChoice::Take(option),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_action_alias() {
        for s in ["f", "FOLD", " fold "] {
            assert_eq!(parse_player_action(s), ParseResult::Action(PlayerAction::Fold));
        }
        for s in ["c", "call", "check", "k"] {
            assert_eq!(parse_player_action(s), ParseResult::Action(PlayerAction::Call));
        }
        for s in ["a", "allin", "all-in"] {
            assert_eq!(parse_player_action(s), ParseResult::AllIn);
        }
        assert_eq!(parse_player_action("h"), ParseResult::Hint);
        assert_eq!(parse_player_action("topup"), ParseResult::TopUp);
        assert_eq!(parse_player_action("quit"), ParseResult::Quit);
        assert_eq!(
            parse_player_action("raise 120"),
            ParseResult::Action(PlayerAction::Raise { to: 120 })
        );
    }

    #[test]
    fn rejects_bad_raises() {
        assert!(matches!(parse_player_action("r"), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_action("r 0"), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_action("r lots"), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_action(""), ParseResult::Invalid(_)));
    }

    #[test]
    fn bankroll_choices() {
        let busted = [
            BankrollOption::Rebuy(500),
            BankrollOption::Rebuy(1000),
            BankrollOption::Rebuy(2000),
        ];
        assert_eq!(
            parse_bankroll_choice("2", &busted),
            BankrollChoice::Take(BankrollOption::Rebuy(1000))
        );
        assert_eq!(
            parse_bankroll_choice("rebuy 2000", &busted),
            BankrollChoice::Take(BankrollOption::Rebuy(2000))
        );
        assert!(matches!(
            parse_bankroll_choice("rebuy", &busted),
            BankrollChoice::Invalid(_)
        ));
        assert!(matches!(
            parse_bankroll_choice("rebuy 700", &busted),
            BankrollChoice::Invalid(_)
        ));
        assert_eq!(parse_bankroll_choice("", &busted), BankrollChoice::Skip);
        assert_eq!(parse_bankroll_choice("q", &busted), BankrollChoice::Quit);

        let short = [BankrollOption::TopUp { to: 2000 }];
        assert_eq!(
            parse_bankroll_choice("topup", &short),
            BankrollChoice::Take(BankrollOption::TopUp { to: 2000 })
        );
        assert!(matches!(
            parse_bankroll_choice("4", &short),
            BankrollChoice::Invalid(_)
        ));
    }
}
