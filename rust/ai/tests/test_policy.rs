use holdem_ai::bot::PersonaBot;
use holdem_ai::coach::{advise, AdviceAction};
use holdem_ai::persona::Persona;
use holdem_ai::ranges::{RangeCfg, RangeTable};
use holdem_ai::rating::{preflop_context, PreflopContext};
use holdem_engine::cards::{Card, Rank as R, Suit as S};
use holdem_engine::deck::Deck;
use holdem_engine::game::{GameState, TableConfig};
use holdem_engine::logger::Street;
use holdem_engine::player::{PlayerAction as A, SeatSpec};
use rand::RngCore;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Yields the same word forever: 0 makes every frequency fire, `u64::MAX`
/// makes none fire.
struct FixedRng(u64);

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }
    fn next_u64(&mut self) -> u64 {
        self.0
    }
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for b in dst {
            *b = self.0 as u8;
        }
    }
}

fn c(r: R, s: S) -> Card {
    Card::new(r, s)
}

fn seats(n: usize) -> Vec<SeatSpec> {
    (0..n)
        .map(|i| SeatSpec::new(format!("P{i}"), i == 0, 1000))
        .collect()
}

/// Heads-up hand, button 0. Deal order is seat 1, seat 0, seat 1, seat 0.
fn heads_up(s0: [Card; 2], s1: [Card; 2], board: &[Card]) -> GameState {
    let mut top = vec![s1[0], s0[0], s1[1], s0[1], c(R::Two, S::Hearts)];
    top.extend_from_slice(&board[..3.min(board.len())]);
    GameState::start_hand(seats(2), TableConfig::default(), 0, Deck::stacked(&top)).unwrap()
}

fn tag() -> PersonaBot {
    PersonaBot::from_table(Persona::TightAggressive, &RangeTable::default())
}

#[test]
fn button_opens_aces_to_two_and_a_half_blinds() {
    let st = heads_up(
        [c(R::Ace, S::Spades), c(R::Ace, S::Hearts)],
        [c(R::Seven, S::Clubs), c(R::Two, S::Diamonds)],
        &[],
    );
    assert_eq!(preflop_context(&st), PreflopContext::Unopened);
    let action = tag().decide(&st, 0, &mut FixedRng(0));
    assert_eq!(action, A::Raise { to: 25 });
}

#[test]
fn under_the_gun_follows_its_thresholds() {
    let st = GameState::start_hand(seats(6), TableConfig::default(), 0, Deck::new()).unwrap();
    let hole = st.players()[3].hole_cards().to_vec();
    let r = holdem_ai::rating::preflop_rating(hole[0], hole[1]);
    let expected = if r >= RangeCfg::standard().open[3] {
        "raise"
    } else if r >= RangeCfg::standard().call[3] {
        "call"
    } else {
        "fold"
    };
    let action = tag().decide(&st, 3, &mut FixedRng(0));
    let got = match action {
        A::Fold => "fold",
        A::Call => "call",
        A::Raise { .. } => "raise",
    };
    assert_eq!(got, expected);
}

/// Three-handed, button 0, button limps and the small blind completes.
/// Deal order is seats 1, 2, 0, 1, 2, 0; the big blind (seat 2) holds kings.
fn limped_to_big_blind() -> GameState {
    let top = [
        c(R::Seven, S::Clubs),
        c(R::King, S::Spades),
        c(R::Eight, S::Diamonds),
        c(R::Two, S::Clubs),
        c(R::King, S::Hearts),
        c(R::Three, S::Diamonds),
    ];
    let mut st = GameState::start_hand(seats(3), TableConfig::default(), 0, Deck::stacked(&top)).unwrap();
    st.step(A::Call);
    st.step(A::Call);
    assert_eq!(st.current(), 2);
    assert_eq!(st.to_call(2), 0);
    st
}

#[test]
fn big_blind_checks_its_option_with_default_ranges() {
    let st = limped_to_big_blind();
    assert_eq!(preflop_context(&st), PreflopContext::Limped);
    assert_eq!(tag().decide(&st, 2, &mut FixedRng(0)), A::Call);

    let advice = advise(&st, 2, &RangeCfg::standard());
    assert_eq!(advice.action, Some(AdviceAction::Check));
    assert_eq!(advice.reason, "Big Blind. Free flop.");
}

#[test]
fn big_blind_raises_its_option_when_the_range_allows() {
    let st = limped_to_big_blind();
    let mut cfg = RangeCfg::standard();
    cfg.iso[2] = 40.0;
    let bot = PersonaBot::new(Persona::TightAggressive, cfg.clone());
    // max(min raise 20, 3bb)
    assert_eq!(bot.decide(&st, 2, &mut FixedRng(0)), A::Raise { to: 30 });

    let advice = advise(&st, 2, &cfg);
    assert_eq!(advice.action, Some(AdviceAction::Raise));
    assert_eq!(advice.reason, "Big Blind. Raise your option.");
}

#[test]
fn premium_three_bets_facing_a_raise() {
    let mut st = heads_up(
        [c(R::Nine, S::Clubs), c(R::Eight, S::Clubs)],
        [c(R::Ace, S::Spades), c(R::Ace, S::Hearts)],
        &[],
    );
    st.step(A::Raise { to: 30 });
    assert_eq!(preflop_context(&st), PreflopContext::Raised);
    let action = tag().decide(&st, 1, &mut FixedRng(0));
    // max(50, 30 + max(round(2.5 * 20), 20))
    assert_eq!(action, A::Raise { to: 80 });
}

fn flop_spot() -> GameState {
    let mut st = heads_up(
        [c(R::Two, S::Clubs), c(R::Seven, S::Diamonds)],
        [c(R::Three, S::Hearts), c(R::Three, S::Spades)],
        &[c(R::King, S::Spades), c(R::Nine, S::Hearts), c(R::Four, S::Diamonds)],
    );
    st.step(A::Raise { to: 30 });
    st.step(A::Call);
    assert_eq!(st.street(), Street::Flop);
    st.step(A::Call); // big blind checks
    assert_eq!(st.current(), 0);
    st
}

#[test]
fn preflop_raiser_continuation_bets_when_the_frequency_fires() {
    let st = flop_spot();
    assert_eq!(st.prev_aggressor(), Some(0));
    let action = tag().decide(&st, 0, &mut FixedRng(0));
    // half of the 60 pot
    assert_eq!(action, A::Raise { to: 30 });
}

#[test]
fn no_continuation_bet_when_the_frequency_misses() {
    let st = flop_spot();
    let action = tag().decide(&st, 0, &mut FixedRng(u64::MAX));
    assert_eq!(action, A::Call);
}

#[test]
fn air_folds_to_a_bet_and_coach_agrees() {
    let mut st = flop_spot();
    st.step(A::Raise { to: 40 });
    st.step(A::Raise { to: 200 });
    assert_eq!(st.current(), 0);
    let action = tag().decide(&st, 0, &mut FixedRng(0));
    assert_eq!(action, A::Fold);
    let advice = advise(&st, 0, &RangeCfg::standard());
    assert_eq!(advice.action, Some(AdviceAction::Fold));
    assert_eq!(advice.reason, "Weak vs bet.");
}

#[test]
fn coach_checks_when_nothing_is_owed_postflop() {
    let st = flop_spot();
    let advice = advise(&st, 0, &RangeCfg::standard());
    assert_eq!(advice.action, Some(AdviceAction::Check));
    assert_eq!(advice.reason, "High Card.");
}

#[test]
fn coach_is_neutral_once_the_hand_is_over() {
    let mut st = heads_up(
        [c(R::Two, S::Clubs), c(R::Seven, S::Diamonds)],
        [c(R::Three, S::Hearts), c(R::Three, S::Spades)],
        &[],
    );
    st.step(A::Fold);
    let advice = advise(&st, 0, &RangeCfg::standard());
    assert_eq!(advice.action, None);
}

#[test]
fn coach_is_deterministic() {
    let st = flop_spot();
    let a = advise(&st, 0, &RangeCfg::tight());
    let b = advise(&st, 0, &RangeCfg::tight());
    assert_eq!(a, b);
}

#[test]
fn bots_finish_every_hand_without_stalling() {
    let ranges = RangeTable::default();
    for seed in 0..100u64 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut st = GameState::start_hand(
            seats(6),
            TableConfig::default(),
            0,
            Deck::shuffled(&mut rng),
        )
        .unwrap();
        let bots: Vec<PersonaBot> = (0..6)
            .map(|i| PersonaBot::from_table(Persona::ALL[i % 3], &ranges))
            .collect();
        let mut steps = 0;
        while !st.is_hand_ended() {
            let seat = st.current();
            let action = bots[seat].decide(&st, seat, &mut rng);
            st.step(action);
            steps += 1;
            assert!(steps < 200, "seed {seed} stalled");
        }
        assert_eq!(st.chips_in_play(), 6000);
    }
}

/// Limped heads-up flop where the big blind bets 20 into seat 0.
fn facing_flop_bet(s0: [Card; 2], board: &[Card]) -> GameState {
    let mut st = heads_up(s0, [c(R::Three, S::Hearts), c(R::Three, S::Spades)], board);
    st.step(A::Call);
    st.step(A::Call);
    assert_eq!(st.street(), Street::Flop);
    st.step(A::Raise { to: 20 });
    assert_eq!(st.to_call(0), 20);
    st
}

#[test]
fn coach_calls_two_pair_and_queens_but_not_jacks() {
    let two_pair = facing_flop_bet(
        [c(R::King, S::Clubs), c(R::Seven, S::Diamonds)],
        &[c(R::King, S::Hearts), c(R::Seven, S::Spades), c(R::Four, S::Diamonds)],
    );
    let advice = advise(&two_pair, 0, &RangeCfg::standard());
    assert_eq!(advice.action, Some(AdviceAction::Call));
    assert_eq!(advice.reason, "Two Pair.");

    let queens = facing_flop_bet(
        [c(R::Queen, S::Clubs), c(R::Eight, S::Diamonds)],
        &[c(R::Queen, S::Hearts), c(R::Nine, S::Spades), c(R::Four, S::Diamonds)],
    );
    assert_eq!(advise(&queens, 0, &RangeCfg::standard()).action, Some(AdviceAction::Call));

    let jacks = facing_flop_bet(
        [c(R::Jack, S::Clubs), c(R::Eight, S::Diamonds)],
        &[c(R::Jack, S::Hearts), c(R::Nine, S::Spades), c(R::Four, S::Diamonds)],
    );
    assert_eq!(advise(&jacks, 0, &RangeCfg::standard()).action, Some(AdviceAction::Fold));
}

#[test]
fn range_overrides_and_advice_go_through_json() {
    let table: RangeTable = serde_json::from_str(
        r#"{"tight": {"open": [30, 34, 999, 28, 26, 22],
                      "call": [24, 26, 22, 24, 22, 20],
                      "iso": [34, 36, 999, 32, 30, 26],
                      "three_bet": 60}}"#,
    )
    .unwrap();
    assert!(table.validate().is_ok());
    assert_eq!(table.loose, RangeCfg::loose());
    assert_eq!(table.tight.three_bet, 60.0);

    let advice = advise(&flop_spot(), 0, &table.tight);
    let json = serde_json::to_value(&advice).unwrap();
    assert_eq!(json["action"], "Check");
    assert_eq!(json["reason"], "High Card.");
}
