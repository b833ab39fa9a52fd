use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{format_cards, Card};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{Award, AwardKind, GameState, TableConfig, MAX_SEATS, MAX_TABLE_CHIPS};
use crate::hand::{best_hand, Score};
use crate::logger::{ActionRecord, HandLog, Street};
use crate::player::{Player, PlayerAction, SeatSpec};
use crate::pot;
use crate::rules::{resolve_action, ValidatedAction};

fn next_seat(seat: usize, n: usize) -> usize {
    (seat + 1) % n
}

/// First seat at or after `from` (wrapping) whose player has chips.
fn first_funded_from(players: &[Player], from: usize) -> Option<usize> {
    let n = players.len();
    (0..n)
        .map(|k| (from + k) % n)
        .find(|&s| !players[s].is_folded())
}

impl GameState {
    /// Opens a table and deals its first hand.
    ///
    /// The button goes to the first funded seat at or after `button`.
    /// Seats with an empty stack sit the hand out.
    pub fn start_hand(
        seats: Vec<SeatSpec>,
        config: TableConfig,
        button: usize,
        deck: Deck,
    ) -> Result<Self, GameError> {
        let players: Vec<Player> = seats
            .into_iter()
            .enumerate()
            .map(|(id, spec)| {
                let stack = spec.stack;
                Player::new(id, spec).reset_for_hand(stack)
            })
            .collect();
        Self::deal_new(players, button, config, deck)
    }

    /// Builds the following hand from a finished one: stacks carry over, the
    /// button moves to the next funded seat. `stack_overrides` replaces the
    /// stack of the listed seats before anything is posted.
    pub fn next_hand(&self, deck: Deck, stack_overrides: &[(usize, u32)]) -> Result<Self, GameError> {
        if !self.hand_ended {
            return Err(GameError::HandInProgress);
        }
        let n = self.players.len();
        if let Some(&(seat, _)) = stack_overrides.iter().find(|(seat, _)| *seat >= n) {
            return Err(GameError::SeatOutOfRange { seat, seats: n });
        }
        let players: Vec<Player> = self
            .players
            .iter()
            .map(|p| {
                let stack = stack_overrides
                    .iter()
                    .rev()
                    .find(|(seat, _)| *seat == p.id())
                    .map_or(p.stack(), |&(_, s)| s);
                p.reset_for_hand(stack)
            })
            .collect();
        Self::deal_new(players, next_seat(self.button, n), self.config, deck)
    }

    fn deal_new(
        mut players: Vec<Player>,
        button_from: usize,
        config: TableConfig,
        mut deck: Deck,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if players.len() > MAX_SEATS {
            return Err(GameError::TooManySeats {
                seats: players.len(),
                max: MAX_SEATS,
            });
        }
        let total: u64 = players.iter().map(|p| u64::from(p.stack())).sum();
        if total > MAX_TABLE_CHIPS {
            return Err(GameError::TooManyChips {
                total,
                max: MAX_TABLE_CHIPS,
            });
        }
        let funded = players.iter().filter(|p| !p.is_folded()).count();
        if funded < 2 {
            return Err(GameError::NotEnoughPlayers { funded });
        }
        let n = players.len();
        let button = first_funded_from(&players, button_from % n)
            .ok_or(GameError::NotEnoughPlayers { funded })?;
        let (sb_seat, bb_seat) = if funded == 2 {
            let bb = first_funded_from(&players, next_seat(button, n)).unwrap_or(button);
            (button, bb)
        } else {
            let sb = first_funded_from(&players, next_seat(button, n)).unwrap_or(button);
            let bb = first_funded_from(&players, next_seat(sb, n)).unwrap_or(sb);
            (sb, bb)
        };

        let mut log = HandLog::new();
        let mut contributions = vec![0u32; n];

        let sb_paid = players[sb_seat].commit(config.small_blind);
        contributions[sb_seat] += sb_paid;
        log.push(format!("{} posts SB {}", players[sb_seat].name(), sb_paid));
        let bb_paid = players[bb_seat].commit(config.big_blind);
        contributions[bb_seat] += bb_paid;
        log.push(format!("{} posts BB {}", players[bb_seat].name(), bb_paid));

        // two passes starting left of the button
        for _ in 0..2 {
            for k in 1..=n {
                let seat = (button + k) % n;
                if players[seat].is_folded() {
                    continue;
                }
                if let Some(card) = deck.deal_card() {
                    players[seat].give_card(card);
                }
            }
        }

        log.push(format!(
            "*** PREFLOP *** BTN: {} | SB: {} | BB: {}",
            players[button].name(),
            players[sb_seat].name(),
            players[bb_seat].name()
        ));

        let mut state = GameState {
            deck,
            board: Vec::with_capacity(5),
            players,
            button,
            sb_seat,
            bb_seat,
            street: Street::Preflop,
            config,
            pot_committed: 0,
            contributions,
            current: bb_seat,
            last_raise: config.big_blind,
            log,
            actions: Vec::new(),
            awards: Vec::new(),
            hand_ended: false,
            aggressor: None,
            preflop_aggressor: None,
            prev_aggressor: None,
        };
        state.current = state.next_eligible_from(next_seat(bb_seat, n));
        tracing::info!(
            button,
            sb = sb_seat,
            bb = bb_seat,
            funded,
            "hand started"
        );
        // blinds alone may already lock the betting
        state.advance();
        Ok(state)
    }

    /// Applies one action for the current actor and advances the hand as far
    /// as it can go without another decision.
    ///
    /// Amounts are clamped, never rejected (see [`resolve_action`]). Once the
    /// hand has ended every call is a no-op.
    pub fn step(&mut self, action: PlayerAction) {
        if self.hand_ended {
            tracing::debug!("step ignored: hand already over");
            return;
        }
        if self.award_if_only_one() {
            return;
        }
        if !self.players[self.current].can_act() {
            self.current = self.next_eligible_from(self.current);
        }
        let seat = self.current;
        if self.players[seat].can_act() {
            self.apply(seat, action);
            if self.award_if_only_one() {
                return;
            }
            self.current = self.next_eligible_from(next_seat(seat, self.players.len()));
        }
        self.advance();
    }

    fn next_eligible_from(&self, from: usize) -> usize {
        let n = self.players.len();
        (0..n)
            .map(|k| (from + k) % n)
            .find(|&s| self.players[s].can_act())
            .unwrap_or(from % n)
    }

    fn apply(&mut self, seat: usize, action: PlayerAction) {
        let max_bet = self.max_bet();
        let min_target = self.min_raise_target();
        let p = &self.players[seat];
        let validated = resolve_action(p.stack(), p.bet(), max_bet, min_target, action);
        let name = p.name().to_string();

        match validated {
            ValidatedAction::Fold => {
                self.players[seat].fold();
                self.log.push(format!("{name} folds"));
            }
            ValidatedAction::Check => {
                self.players[seat].set_acted(true);
                self.log.push(format!("{name} checks"));
            }
            ValidatedAction::Call(amount) => {
                let paid = self.players[seat].commit(amount);
                self.contributions[seat] += paid;
                self.players[seat].set_acted(true);
                let suffix = if self.players[seat].is_all_in() { " and is all-in" } else { "" };
                self.log.push(format!("{name} calls {paid}{suffix}"));
            }
            ValidatedAction::Raise { added, .. } => {
                let paid = self.players[seat].commit(added);
                self.contributions[seat] += paid;
                let new_max = self.max_bet();
                let raise_size = new_max.saturating_sub(max_bet);
                if raise_size >= self.last_raise {
                    self.last_raise = raise_size;
                }
                for (i, q) in self.players.iter_mut().enumerate() {
                    if !q.is_folded() && !q.is_all_in() {
                        q.set_acted(i == seat);
                    }
                }
                self.players[seat].set_acted(true);
                if self.street == Street::Preflop {
                    self.preflop_aggressor = Some(seat);
                } else {
                    self.aggressor = Some(seat);
                }
                let suffix = if self.players[seat].is_all_in() { " and is all-in" } else { "" };
                self.log.push(format!("{name} raises to {new_max}{suffix}"));
            }
        }
        tracing::debug!(seat, street = %self.street, action = ?validated, "action applied");
        self.actions.push(ActionRecord {
            seat,
            street: self.street,
            action: validated,
        });
    }

    /// Ends the hand when a single unfolded player remains, handing over
    /// every chip in the middle.
    fn award_if_only_one(&mut self) -> bool {
        let mut live = self.players.iter().filter(|p| !p.is_folded());
        let winner = match (live.next(), live.next()) {
            (Some(p), None) => p.id(),
            _ => return false,
        };
        let bets: u32 = self.players.iter_mut().map(Player::clear_bet).sum();
        let total = self.pot_committed + bets;
        self.pot_committed = 0;
        self.players[winner].add_chips(total);
        self.awards.push(Award {
            seat: winner,
            amount: total,
            kind: AwardKind::Uncontested,
        });
        let name = self.players[winner].name().to_string();
        self.log
            .push(format!("{name} wins {total} (everyone else folded)"));
        self.hand_ended = true;
        tracing::info!(winner, total, "hand won uncontested");
        true
    }

    /// No further decision is possible on this street: nobody can act, or
    /// the only player who can has already matched the highest bet.
    fn betting_locked(&self) -> bool {
        let mut able = self.players.iter().filter(|p| p.can_act());
        match (able.next(), able.next()) {
            (None, _) => true,
            (Some(p), None) => p.bet() >= self.max_bet(),
            _ => false,
        }
    }

    fn round_settled(&self) -> bool {
        let max_bet = self.max_bet();
        self.players
            .iter()
            .filter(|p| p.can_act())
            .all(|p| p.has_acted() && p.bet() == max_bet)
    }

    fn advance(&mut self) {
        while !self.hand_ended {
            if !self.betting_locked() && !self.round_settled() {
                return;
            }
            self.sweep_bets();
            if self.street == Street::River {
                self.showdown();
                return;
            }
            self.deal_next_street();
        }
    }

    fn sweep_bets(&mut self) {
        let swept: u32 = self.players.iter_mut().map(Player::clear_bet).sum();
        self.pot_committed += swept;
        for p in &mut self.players {
            p.set_acted(false);
        }
        self.last_raise = self.config.big_blind;
    }

    fn deal_next_street(&mut self) {
        let (next, count) = match self.street {
            Street::Preflop => (Street::Flop, 3),
            Street::Flop => (Street::Turn, 1),
            Street::Turn => (Street::River, 1),
            Street::River | Street::Showdown => return,
        };
        self.prev_aggressor = if self.street == Street::Preflop {
            self.preflop_aggressor
        } else {
            self.aggressor
        };
        self.aggressor = None;
        self.deck.burn_card();
        let dealt: Vec<Card> = (0..count).filter_map(|_| self.deck.deal_card()).collect();
        self.board.extend_from_slice(&dealt);
        self.street = next;
        self.current = self.next_eligible_from(next_seat(self.button, self.players.len()));
        self.log.push(format!(
            "*** {} *** {} (pot {})",
            next,
            format_cards(&self.board),
            self.pot_committed
        ));
        tracing::debug!(street = %next, board = %format_cards(&self.board), "street dealt");
    }

    fn score_of(&self, seat: usize) -> Option<(Score, [Card; 5])> {
        let p = &self.players[seat];
        if p.is_folded() || p.hole_cards().len() < 2 {
            return None;
        }
        let mut cards: Vec<Card> = p.hole_cards().to_vec();
        cards.extend_from_slice(&self.board);
        best_hand(&cards)
    }

    fn showdown(&mut self) {
        self.street = Street::Showdown;
        if self.award_if_only_one() {
            return;
        }
        let folded: Vec<bool> = self.players.iter().map(Player::is_folded).collect();
        let settlement = pot::build_layers(&self.contributions, &folded);

        if let Some(refund) = settlement.refund {
            self.players[refund.seat].add_chips(refund.amount);
            self.awards.push(Award {
                seat: refund.seat,
                amount: refund.amount,
                kind: AwardKind::Refund,
            });
            let name = self.players[refund.seat].name().to_string();
            self.log
                .push(format!("{name} gets back {} uncalled", refund.amount));
        }

        let hands: Vec<Option<(Score, [Card; 5])>> =
            (0..self.players.len()).map(|s| self.score_of(s)).collect();
        let scores: Vec<Option<Score>> = hands.iter().map(|h| h.map(|(s, _)| s)).collect();

        for (i, layer) in pot::merge_layers(settlement.layers).iter().enumerate() {
            let index = i + 1;
            let contestants: Vec<&str> = layer
                .eligible
                .iter()
                .map(|&s| self.players[s].name())
                .collect();
            self.log.push(format!(
                "Pot {index} ({}): {}",
                layer.amount,
                contestants.join(", ")
            ));
            let winners = pot::layer_winners(layer, &scores);
            for (seat, share) in pot::split(layer.amount, &winners) {
                self.players[seat].add_chips(share);
                self.awards.push(Award {
                    seat,
                    amount: share,
                    kind: AwardKind::Pot { index },
                });
                let with = scores[seat].map_or("no hand", |s| s.describe());
                let name = self.players[seat].name().to_string();
                self.log.push(format!("{name} wins {share} with {with}"));
            }
        }

        for (seat, hand) in hands.iter().enumerate() {
            if let Some((score, five)) = hand {
                let name = self.players[seat].name().to_string();
                self.log.push(format!(
                    "{name} shows {} ({})",
                    format_cards(five),
                    score.describe()
                ));
            }
        }
        self.log.push(format!(
            "Showdown complete. Board: {}",
            format_cards(&self.board)
        ));
        self.pot_committed = 0;
        self.hand_ended = true;
        tracing::info!(awards = self.awards.len(), "showdown settled");
    }
}

/// Multi-hand session: owns the table's random source and rolls one
/// [`GameState`] into the next.
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::Engine;
/// use holdem_engine::game::TableConfig;
/// use holdem_engine::player::{PlayerAction, SeatSpec};
///
/// let seats = vec![SeatSpec::new("You", true, 1000), SeatSpec::new("Bot", false, 1000)];
/// let mut engine = Engine::new(seats, TableConfig::default(), 42).unwrap();
/// while !engine.state().is_hand_ended() {
///     engine.step(PlayerAction::Call);
/// }
/// assert_eq!(engine.state().chips_in_play(), 2000);
/// assert_eq!(engine.hand_number(), 1);
/// ```
#[derive(Debug)]
pub struct Engine {
    state: GameState,
    rng: ChaCha20Rng,
    pending_stacks: Vec<(usize, u32)>,
    hands: u64,
}

impl Engine {
    /// Seats the table and deals the first hand with the button on seat 0.
    pub fn new(seats: Vec<SeatSpec>, config: TableConfig, seed: u64) -> Result<Self, GameError> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng);
        let state = GameState::start_hand(seats, config, 0, deck)?;
        Ok(Self {
            state,
            rng,
            pending_stacks: Vec::new(),
            hands: 1,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Number of hands dealt so far, including the current one.
    pub fn hand_number(&self) -> u64 {
        self.hands
    }

    pub fn step(&mut self, action: PlayerAction) -> &GameState {
        self.state.step(action);
        &self.state
    }

    /// Schedules a stack change (rebuy, top-up) for the next hand. Only
    /// allowed between hands.
    pub fn set_stack(&mut self, seat: usize, amount: u32) -> Result<(), GameError> {
        if !self.state.is_hand_ended() {
            return Err(GameError::HandInProgress);
        }
        let seats = self.state.players().len();
        if seat >= seats {
            return Err(GameError::SeatOutOfRange { seat, seats });
        }
        let total: u64 = (0..seats)
            .filter(|&s| s != seat)
            .filter_map(|s| self.next_stack(s))
            .map(u64::from)
            .sum::<u64>()
            + u64::from(amount);
        if total > MAX_TABLE_CHIPS {
            return Err(GameError::TooManyChips {
                total,
                max: MAX_TABLE_CHIPS,
            });
        }
        self.pending_stacks.retain(|(s, _)| *s != seat);
        self.pending_stacks.push((seat, amount));
        Ok(())
    }

    /// Stack `seat` will carry into the next hand.
    pub fn next_stack(&self, seat: usize) -> Option<u32> {
        self.pending_stacks
            .iter()
            .find(|(s, _)| *s == seat)
            .map(|&(_, amount)| amount)
            .or_else(|| self.state.player(seat).map(Player::stack))
    }

    pub fn start_hand(&mut self) -> Result<&GameState, GameError> {
        let deck = Deck::shuffled(&mut self.rng);
        let next = self.state.next_hand(deck, &self.pending_stacks)?;
        self.state = next;
        self.pending_stacks.clear();
        self.hands += 1;
        Ok(&self.state)
    }
}
