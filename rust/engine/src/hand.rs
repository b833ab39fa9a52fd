use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

/// Comparable strength of a five-card hand.
///
/// Ordering is lexicographic over `(category, kickers)`. Kickers are ordered
/// most significant first and padded with zeros, so categories that need
/// fewer tie-breakers (a straight only needs its high card) compare exactly
/// as a shorter tuple would.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Score {
    pub category: Category,
    pub kickers: [u8; 5],
}

impl Score {
    pub fn describe(&self) -> &'static str {
        self.category.name()
    }
}

pub fn compare(a: &Score, b: &Score) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Scores exactly five cards.
pub fn rank5(cards: &[Card; 5]) -> Score {
    let mut rank_counts = [0u8; 15];
    let mut rank_mask: u16 = 0;
    for c in cards.iter() {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1u16 << r;
    }
    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = if rank_mask.count_ones() == 5 {
        straight_high_from_mask(rank_mask)
    } else {
        None
    };

    // (count, rank) groups, largest group first, then highest rank
    let mut groups = [(0u8, 0u8); 5];
    let mut n = 0;
    for r in (2..=14u8).rev() {
        let count = rank_counts[r as usize];
        if count > 0 {
            groups[n] = (count, r);
            n += 1;
        }
    }
    groups[..n].sort_by(|a, b| b.cmp(a));

    let mut grouped = [0u8; 5];
    for (slot, &(_, r)) in grouped.iter_mut().zip(groups[..n].iter()) {
        *slot = r;
    }

    let category = match (straight, flush, groups[0].0, groups[1].0) {
        (Some(_), true, _, _) => Category::StraightFlush,
        (_, _, 4, _) => Category::FourOfAKind,
        (_, _, 3, 2) => Category::FullHouse,
        (_, true, _, _) => Category::Flush,
        (Some(_), false, _, _) => Category::Straight,
        (_, _, 3, _) => Category::ThreeOfAKind,
        (_, _, 2, 2) => Category::TwoPair,
        (_, _, 2, _) => Category::OnePair,
        _ => Category::HighCard,
    };

    let kickers = match (category, straight) {
        (Category::StraightFlush | Category::Straight, Some(high)) => [high, 0, 0, 0, 0],
        _ => grouped,
    };

    Score { category, kickers }
}

/// Best five-card hand out of seven. Ties may return any maximizing subset.
pub fn best5of7(cards: &[Card; 7]) -> (Score, [Card; 5]) {
    let mut best_score = rank5(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);
    let mut best_five = [cards[0], cards[1], cards[2], cards[3], cards[4]];
    for_each_five(cards, |five| {
        let s = rank5(five);
        if s > best_score {
            best_score = s;
            best_five = *five;
        }
    });
    (best_score, best_five)
}

/// Best five-card hand from five to seven cards (hole cards plus a partial
/// or complete board). Returns `None` for fewer than five cards.
pub fn best_hand(cards: &[Card]) -> Option<(Score, [Card; 5])> {
    if cards.len() < 5 {
        return None;
    }
    let mut best: Option<(Score, [Card; 5])> = None;
    for_each_five(cards, |five| {
        let s = rank5(five);
        if best.is_none_or(|(b, _)| s > b) {
            best = Some((s, *five));
        }
    });
    best
}

fn for_each_five(cards: &[Card], mut f: impl FnMut(&[Card; 5])) {
    let n = cards.len();
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        f(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                    }
                }
            }
        }
    }
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    // Ace also plays low
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5; never wraps past the ace
    for high in (5..=14u8).rev() {
        let window = 0b1_1111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

fn rank_mask(cards: &[Card]) -> u16 {
    cards.iter().fold(0u16, |m, c| m | (1u16 << c.rank.value()))
}

/// Four cards of one suit among hole cards plus at least three board cards.
pub fn has_flush_draw(cards: &[Card]) -> bool {
    if cards.len() < 5 {
        return false;
    }
    let mut suit_counts = [0u8; 4];
    for c in cards {
        suit_counts[c.suit.index()] += 1;
    }
    suit_counts.iter().any(|&n| n >= 4)
}

/// Four consecutive distinct ranks (ace counted low as well) among hole cards
/// plus at least three board cards.
pub fn has_straight_draw(cards: &[Card]) -> bool {
    if cards.len() < 5 {
        return false;
    }
    let mut m = rank_mask(cards);
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    (4..=14u8).any(|high| {
        let window = 0b1111u16 << (high - 3);
        (m & window) == window
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank as R, Suit as S};

    fn c(s: S, r: R) -> Card {
        Card { suit: s, rank: r }
    }

    #[test]
    fn wheel_reports_five_high() {
        let wheel = [
            c(S::Clubs, R::Ace),
            c(S::Hearts, R::Two),
            c(S::Spades, R::Three),
            c(S::Diamonds, R::Four),
            c(S::Clubs, R::Five),
        ];
        let s = rank5(&wheel);
        assert_eq!(s.category, Category::Straight);
        assert_eq!(s.kickers[0], 5);
    }

    #[test]
    fn no_wrap_around_straight() {
        let wrap = [
            c(S::Clubs, R::Queen),
            c(S::Hearts, R::King),
            c(S::Spades, R::Ace),
            c(S::Diamonds, R::Two),
            c(S::Clubs, R::Three),
        ];
        assert_eq!(rank5(&wrap).category, Category::HighCard);
    }

    #[test]
    fn full_house_orders_trips_then_pair() {
        let fh = [
            c(S::Clubs, R::Two),
            c(S::Hearts, R::Two),
            c(S::Spades, R::Two),
            c(S::Diamonds, R::Ace),
            c(S::Clubs, R::Ace),
        ];
        let s = rank5(&fh);
        assert_eq!(s.category, Category::FullHouse);
        assert_eq!(s.kickers, [2, 14, 0, 0, 0]);
    }

    #[test]
    fn draws_need_three_board_cards() {
        let four_hearts = [
            c(S::Hearts, R::Two),
            c(S::Hearts, R::Nine),
            c(S::Hearts, R::King),
            c(S::Hearts, R::Four),
        ];
        assert!(!has_flush_draw(&four_hearts));
        let mut five = four_hearts.to_vec();
        five.push(c(S::Spades, R::Ace));
        assert!(has_flush_draw(&five));
    }

    #[test]
    fn straight_draw_counts_ace_low() {
        let cards = [
            c(S::Hearts, R::Ace),
            c(S::Clubs, R::Two),
            c(S::Spades, R::Three),
            c(S::Diamonds, R::Four),
            c(S::Hearts, R::King),
        ];
        assert!(has_straight_draw(&cards));
        let gapped = [
            c(S::Hearts, R::Ace),
            c(S::Clubs, R::Two),
            c(S::Spades, R::Three),
            c(S::Diamonds, R::Nine),
            c(S::Hearts, R::King),
        ];
        assert!(!has_straight_draw(&gapped));
    }
}
