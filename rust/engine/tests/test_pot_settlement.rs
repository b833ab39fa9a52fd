use holdem_engine::cards::{Card, Rank as R, Suit as S};
use holdem_engine::hand::rank5;
use holdem_engine::pot::{build_layers, layer_winners, merge_layers, split, PotLayer};

#[test]
fn three_way_all_in_builds_main_and_side_pot() {
    // A=100 all-in, B=300, C=300
    let s = build_layers(&[100, 300, 300], &[false, false, false]);
    assert_eq!(
        s.layers,
        vec![
            PotLayer { amount: 300, eligible: vec![0, 1, 2] },
            PotLayer { amount: 400, eligible: vec![1, 2] },
        ]
    );
    assert!(s.refund.is_none());
    assert_eq!(s.total(), 700);
}

#[test]
fn lone_top_contributor_is_refunded() {
    let s = build_layers(&[500, 200, 0], &[false, false, true]);
    assert_eq!(s.layers.len(), 1);
    assert_eq!(s.layers[0].amount, 400);
    let refund = s.refund.expect("uncalled excess");
    assert_eq!((refund.seat, refund.amount), (0, 300));
}

#[test]
fn folded_money_stays_in_the_pot() {
    // seat 2 folded after putting in 50
    let s = build_layers(&[200, 200, 50], &[false, false, true]);
    assert_eq!(s.total(), 450);
    let merged = merge_layers(s.layers);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].amount, 450);
    assert_eq!(merged[0].eligible, vec![0, 1]);
}

#[test]
fn side_pot_goes_to_best_eligible_hand() {
    let c = Card::new;
    let quads = rank5(&[
        c(R::Nine, S::Spades),
        c(R::Nine, S::Hearts),
        c(R::Nine, S::Clubs),
        c(R::Nine, S::Diamonds),
        c(R::Two, S::Spades),
    ]);
    let pair = rank5(&[
        c(R::King, S::Spades),
        c(R::King, S::Hearts),
        c(R::Four, S::Clubs),
        c(R::Three, S::Diamonds),
        c(R::Two, S::Hearts),
    ]);
    let high = rank5(&[
        c(R::Ace, S::Spades),
        c(R::Jack, S::Hearts),
        c(R::Eight, S::Clubs),
        c(R::Six, S::Diamonds),
        c(R::Two, S::Clubs),
    ]);
    let scores = vec![Some(quads), Some(pair), Some(high)];
    let s = build_layers(&[100, 300, 300], &[false, false, false]);
    assert_eq!(layer_winners(&s.layers[0], &scores), vec![0]);
    assert_eq!(layer_winners(&s.layers[1], &scores), vec![1]);
}

#[test]
fn split_shares_always_sum_to_the_layer() {
    for amount in [1u32, 7, 25, 100, 1001] {
        for n in 1..=6usize {
            let winners: Vec<usize> = (0..n).collect();
            let shares = split(amount, &winners);
            assert_eq!(shares.iter().map(|(_, a)| a).sum::<u32>(), amount);
            let max = shares.iter().map(|(_, a)| *a).max().unwrap();
            let min = shares.iter().map(|(_, a)| *a).min().unwrap();
            assert!(max - min <= 1);
        }
    }
}
