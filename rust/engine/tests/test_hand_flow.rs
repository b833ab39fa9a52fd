use holdem_engine::cards::{Card, Rank as R, Suit as S};
use holdem_engine::deck::Deck;
use holdem_engine::game::{AwardKind, GameState, TableConfig};
use holdem_engine::logger::Street;
use holdem_engine::player::{PlayerAction as A, SeatSpec};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn seats(stacks: &[u32]) -> Vec<SeatSpec> {
    stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| SeatSpec::new(format!("P{i}"), i == 0, s))
        .collect()
}

fn c(r: R, s: S) -> Card {
    Card::new(r, s)
}

/// Broadway on the board, harmless hole cards, burns in between.
fn broadway_deck(holes: &[Card]) -> Deck {
    let mut top = holes.to_vec();
    top.extend([
        c(R::Nine, S::Hearts),
        c(R::Ace, S::Spades),
        c(R::King, S::Diamonds),
        c(R::Queen, S::Clubs),
        c(R::Eight, S::Hearts),
        c(R::Jack, S::Hearts),
        c(R::Seven, S::Hearts),
        c(R::Ten, S::Spades),
    ]);
    Deck::stacked(&top)
}

#[test]
fn heads_up_limp_down_splits_the_pot() {
    let deck = broadway_deck(&[
        c(R::Two, S::Clubs),
        c(R::Three, S::Clubs),
        c(R::Four, S::Diamonds),
        c(R::Five, S::Diamonds),
    ]);
    let mut st = GameState::start_hand(seats(&[1000, 1000]), TableConfig::default(), 0, deck).unwrap();
    st.step(A::Call);
    st.step(A::Call);
    assert_eq!(st.street(), Street::Flop);
    assert_eq!(st.pot_total(), 20);
    for _ in 0..6 {
        st.step(A::Call);
    }
    assert!(st.is_hand_ended());
    assert_eq!(st.street(), Street::Showdown);
    assert_eq!(st.players()[0].stack(), 1000);
    assert_eq!(st.players()[1].stack(), 1000);
    assert_eq!(st.pot_committed(), 0);
    assert!(st
        .log()
        .lines()
        .last()
        .is_some_and(|l| l.starts_with("Showdown complete")));
}

#[test]
fn odd_chip_goes_to_lowest_seat() {
    // deal order with button 0: seats 1, 2, 0, 1, 2, 0
    let deck = broadway_deck(&[
        c(R::Two, S::Clubs),
        c(R::Two, S::Diamonds),
        c(R::Three, S::Clubs),
        c(R::Four, S::Clubs),
        c(R::Four, S::Diamonds),
        c(R::Five, S::Diamonds),
    ]);
    let mut st =
        GameState::start_hand(seats(&[1000, 1000, 1000]), TableConfig::default(), 0, deck).unwrap();
    st.step(A::Call); // button limps
    st.step(A::Fold); // SB leaves 5 behind
    st.step(A::Call); // BB checks
    assert_eq!(st.pot_committed(), 25);
    while !st.is_hand_ended() {
        st.step(A::Call);
    }
    assert_eq!(st.players()[0].stack(), 1003);
    assert_eq!(st.players()[1].stack(), 995);
    assert_eq!(st.players()[2].stack(), 1002);
}

#[test]
fn fold_to_big_blind_awards_uncontested() {
    let mut st =
        GameState::start_hand(seats(&[1000, 1000]), TableConfig::default(), 0, Deck::new_with_seed(5))
            .unwrap();
    st.step(A::Fold);
    assert!(st.is_hand_ended());
    assert_eq!(st.awards().len(), 1);
    assert_eq!(st.awards()[0].seat, 1);
    assert_eq!(st.awards()[0].amount, 15);
    assert_eq!(st.awards()[0].kind, AwardKind::Uncontested);
    assert_eq!(st.players()[1].stack(), 1005);
    assert_eq!(st.pot_total(), 0);
}

#[test]
fn step_after_hand_end_changes_nothing() {
    let mut st =
        GameState::start_hand(seats(&[1000, 1000]), TableConfig::default(), 0, Deck::new_with_seed(5))
            .unwrap();
    st.step(A::Fold);
    let before = serde_json::to_value(&st).unwrap();
    st.step(A::Raise { to: 500 });
    st.step(A::Call);
    assert_eq!(serde_json::to_value(&st).unwrap(), before);
}

#[test]
fn all_in_call_runs_the_board_out() {
    let mut st =
        GameState::start_hand(seats(&[1000, 1000]), TableConfig::default(), 0, Deck::new_with_seed(11))
            .unwrap();
    st.step(A::Raise { to: 1000 });
    // the caller still owes chips and must decide
    assert_eq!(st.street(), Street::Preflop);
    assert_eq!(st.current(), 1);
    assert!(st.board().is_empty());
    st.step(A::Call);
    assert!(st.is_hand_ended());
    assert_eq!(st.board().len(), 5);
    assert_eq!(st.chips_in_play(), 2000);
}

#[test]
fn lone_player_owing_chips_acts_before_fast_forward() {
    let mut st =
        GameState::start_hand(seats(&[1000, 200, 1000]), TableConfig::default(), 0, Deck::new_with_seed(8))
            .unwrap();
    st.step(A::Raise { to: 30 });
    st.step(A::Raise { to: 200 }); // SB all-in
    st.step(A::Fold); // BB
    assert_eq!(st.count_eligible(), 1);
    assert_eq!(st.current(), 0);
    assert_eq!(st.to_call(0), 170);
    assert!(!st.is_hand_ended());
    st.step(A::Call);
    assert!(st.is_hand_ended());
    assert_eq!(st.board().len(), 5);
}

#[test]
fn all_ins_on_the_flop_run_out_once() {
    let mut st = GameState::start_hand(
        seats(&[1000, 300, 500]),
        TableConfig::default(),
        0,
        Deck::new_with_seed(17),
    )
    .unwrap();
    st.step(A::Call); // button limps
    st.step(A::Call); // SB completes
    st.step(A::Call); // BB checks
    assert_eq!(st.street(), Street::Flop);
    assert_eq!(st.current(), 1);

    st.step(A::Raise { to: 290 }); // SB shoves
    st.step(A::Raise { to: 490 }); // BB shoves over
    assert_eq!(st.count_eligible(), 1);
    assert!(!st.is_hand_ended());
    assert_eq!(st.to_call(0), 490);
    st.step(A::Call);

    assert!(st.is_hand_ended());
    assert_eq!(st.board().len(), 5);
    // 6 hole cards, 3 burns, 5 board cards
    assert_eq!(st.deck_remaining(), 38);
    assert_eq!(st.contributions(), &[500, 300, 500]);
    let pot = |index: usize| -> u32 {
        st.awards()
            .iter()
            .filter(|a| a.kind == AwardKind::Pot { index })
            .map(|a| a.amount)
            .sum()
    };
    assert_eq!(pot(1), 900);
    assert_eq!(pot(2), 400);
    assert_eq!(st.pot_committed(), 0);
    assert_eq!(st.chips_in_play(), 1800);
}

#[test]
fn blinds_that_lock_betting_run_out_at_construction() {
    let st = GameState::start_hand(seats(&[5, 1000]), TableConfig::default(), 0, Deck::new_with_seed(2))
        .unwrap();
    assert!(st.is_hand_ended());
    assert_eq!(st.board().len(), 5);
    assert!(st
        .awards()
        .iter()
        .any(|a| a.kind == AwardKind::Refund && a.seat == 1 && a.amount == 5));
    assert_eq!(st.chips_in_play(), 1005);
}

#[test]
fn button_rotates_past_busted_seats() {
    let mut st =
        GameState::start_hand(seats(&[1000, 1000, 1000]), TableConfig::default(), 0, Deck::new_with_seed(4))
            .unwrap();
    while !st.is_hand_ended() {
        st.step(A::Fold);
    }
    let next = st.next_hand(Deck::new_with_seed(5), &[(1, 0)]).unwrap();
    assert_eq!(next.button(), 2);
    assert!(next.players()[1].is_folded());
    // heads-up now: button posts the small blind
    assert_eq!(next.small_blind_seat(), 2);
    assert_eq!(next.big_blind_seat(), 0);
}

#[test]
fn next_hand_refuses_while_in_progress() {
    let st =
        GameState::start_hand(seats(&[1000, 1000]), TableConfig::default(), 0, Deck::new_with_seed(4))
            .unwrap();
    assert!(st.next_hand(Deck::new(), &[]).is_err());
}

#[test]
fn random_play_conserves_chips_and_always_finishes() {
    for seed in 0..200u64 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let n = rng.random_range(2..=6);
        let stacks: Vec<u32> = (0..n).map(|_| rng.random_range(1..=400)).collect();
        let total: u64 = stacks.iter().map(|&s| s as u64).sum();
        let mut st = GameState::start_hand(
            seats(&stacks),
            TableConfig::default(),
            0,
            Deck::shuffled(&mut rng),
        )
        .unwrap();

        for hand in 0..5 {
            let mut steps = 0;
            while !st.is_hand_ended() {
                let action = match rng.random_range(0..10) {
                    0 => A::Fold,
                    1..=6 => A::Call,
                    _ => A::Raise { to: rng.random_range(0..=500) },
                };
                st.step(action);
                assert_eq!(st.chips_in_play(), total, "seed {seed} hand {hand}");
                steps += 1;
                assert!(steps < 500, "seed {seed} hand {hand} did not finish");
            }
            let awarded: u32 = st.awards().iter().map(|a| a.amount).sum();
            let contributed: u32 = st.contributions().iter().sum();
            assert_eq!(awarded, contributed, "seed {seed} hand {hand}");
            assert_eq!(st.pot_total(), 0);

            match st.next_hand(Deck::shuffled(&mut rng), &[]) {
                Ok(next) => st = next,
                Err(_) => break,
            }
        }
    }
}

#[test]
fn short_stacks_all_in_deal_to_showdown() {
    for seed in 0..50u64 {
        let mut st = GameState::start_hand(
            seats(&[1000, 60, 120, 200]),
            TableConfig::default(),
            0,
            Deck::new_with_seed(seed),
        )
        .unwrap();
        // everyone shoves or calls
        while !st.is_hand_ended() {
            st.step(A::Raise { to: 1000 });
        }
        assert_eq!(st.board().len(), 5);
        assert_eq!(st.street(), Street::Showdown);
        assert_eq!(st.chips_in_play(), 1380);
    }
}
