//! Side-pot settlement from cumulative contributions.
//!
//! No pot objects are tracked during play. At hand end the main and side
//! pots are rebuilt by peeling equal-contribution layers off the per-seat
//! totals, then each layer is awarded on its own.

use serde::Serialize;

use crate::hand::Score;

/// One contested layer of the pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PotLayer {
    pub amount: u32,
    /// Seats that may win this layer, ascending
    pub eligible: Vec<usize>,
}

/// Uncalled excess handed back to the only seat that put it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Refund {
    pub seat: usize,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settlement {
    pub layers: Vec<PotLayer>,
    pub refund: Option<Refund>,
}

impl Settlement {
    pub fn total(&self) -> u32 {
        self.layers.iter().map(|l| l.amount).sum::<u32>() + self.refund.map_or(0, |r| r.amount)
    }
}

/// Peels pot layers off `contributions`.
///
/// Folded seats still size every layer they paid into but are never
/// eligible to win it. A layer nobody live paid into is carried into the
/// previous layer so no chips are lost.
///
/// # Examples
///
/// ```
/// use holdem_engine::pot::build_layers;
///
/// // A=300 B=300 C=150 D=150 (D folded)
/// let s = build_layers(&[300, 300, 150, 150], &[false, false, false, true]);
/// assert_eq!(s.layers[0].amount, 600);
/// assert_eq!(s.layers[0].eligible, vec![0, 1, 2]);
/// assert_eq!(s.layers[1].amount, 300);
/// assert_eq!(s.layers[1].eligible, vec![0, 1]);
/// assert!(s.refund.is_none());
/// ```
pub fn build_layers(contributions: &[u32], folded: &[bool]) -> Settlement {
    let mut remaining = contributions.to_vec();
    let mut settlement = Settlement::default();

    loop {
        let contributing: Vec<usize> = (0..remaining.len())
            .filter(|&i| remaining[i] > 0)
            .collect();
        match contributing.as_slice() {
            [] => break,
            [seat] => {
                settlement.refund = Some(Refund {
                    seat: *seat,
                    amount: remaining[*seat],
                });
                remaining[*seat] = 0;
            }
            _ => {
                let m = contributing
                    .iter()
                    .map(|&i| remaining[i])
                    .min()
                    .unwrap_or(0);
                let amount = m * contributing.len() as u32;
                let eligible: Vec<usize> = contributing
                    .iter()
                    .copied()
                    .filter(|&i| !folded.get(i).copied().unwrap_or(false))
                    .collect();
                if !eligible.is_empty() {
                    settlement.layers.push(PotLayer { amount, eligible });
                } else if let Some(prev) = settlement.layers.last_mut() {
                    prev.amount += amount;
                } else {
                    settlement.layers.push(PotLayer {
                        amount,
                        eligible: contributing.clone(),
                    });
                }
                for &i in &contributing {
                    remaining[i] -= m;
                }
            }
        }
    }
    settlement
}

/// Merges consecutive layers that share the same eligible seats. Amounts are
/// summed; this only changes how pots are reported.
pub fn merge_layers(layers: Vec<PotLayer>) -> Vec<PotLayer> {
    let mut merged: Vec<PotLayer> = Vec::with_capacity(layers.len());
    for layer in layers {
        match merged.last_mut() {
            Some(last) if last.eligible == layer.eligible => last.amount += layer.amount,
            _ => merged.push(layer),
        }
    }
    merged
}

/// Splits `amount` evenly across `winners` (ascending seats). Remainder chips
/// go one at a time to the lowest seats first, so the shares always sum to
/// `amount`.
pub fn split(amount: u32, winners: &[usize]) -> Vec<(usize, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u32;
    let share = amount / n;
    let mut remainder = amount - share * n;
    winners
        .iter()
        .map(|&seat| {
            let extra = if remainder > 0 {
                remainder -= 1;
                1
            } else {
                0
            };
            (seat, share + extra)
        })
        .collect()
}

/// Seats holding the best score among the layer's eligible seats.
/// `scores` is indexed by seat; seats without a score cannot win.
pub fn layer_winners(layer: &PotLayer, scores: &[Option<Score>]) -> Vec<usize> {
    let best = layer
        .eligible
        .iter()
        .filter_map(|&i| scores.get(i).copied().flatten())
        .max();
    match best {
        Some(best) => layer
            .eligible
            .iter()
            .copied()
            .filter(|&i| scores.get(i).copied().flatten() == Some(best))
            .collect(),
        // nobody can show a hand: share among everyone eligible
        None => layer.eligible.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_hands_odd_chip_to_lowest_seat() {
        assert_eq!(split(21, &[1, 3]), vec![(1, 11), (3, 10)]);
        assert_eq!(split(20, &[0, 1]), vec![(0, 10), (1, 10)]);
        assert_eq!(split(8, &[0, 2, 4]), vec![(0, 3), (2, 3), (4, 2)]);
    }

    #[test]
    fn merge_joins_only_adjacent_identical_sets() {
        let layers = vec![
            PotLayer { amount: 30, eligible: vec![0, 1] },
            PotLayer { amount: 20, eligible: vec![0, 1] },
            PotLayer { amount: 10, eligible: vec![0] },
        ];
        let merged = merge_layers(layers);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].amount, 50);
        assert_eq!(merged[1].eligible, vec![0]);
    }

    #[test]
    fn empty_contributions_settle_to_nothing() {
        let s = build_layers(&[0, 0, 0], &[false, false, false]);
        assert!(s.layers.is_empty());
        assert!(s.refund.is_none());
    }
}
