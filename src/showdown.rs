use crate::cards::{Board, Hand, Strength};
use crate::table::{SeatStatus, Table};

/// One seat's result from a hand: what it risked, what it won back, and the
/// strength it showed (or would have shown) at showdown.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Settlement {
    pub seat_index: usize,
    pub player_id: u64,
    pub risked: u64,
    pub reward: u64,
    pub status: SeatStatus,
    pub strength: Option<Strength>,
}

/// Stratifies the pot into side-pot layers by distinct all-in stake level
/// and awards each layer only to the non-folded players who reached it,
/// splitting a layer's remainder one chip at a time to winners in
/// button-relative seat order.
///
/// Settles layers from the lowest stake level to the highest, mirroring how
/// side pots actually form: the shortest stack's contribution caps the
/// first layer every player (folded or not) is eligible to have funded, the
/// next-shortest caps the second, and so on.
pub struct Showdown {
    settlements: Vec<Settlement>,
    seat_order: Vec<usize>,
    prev_stake: u64,
}

impl Showdown {
    pub fn new(table: &Table, board: &Board) -> Self {
        let seat_order = table.seats_left_of_button();
        let settlements = seat_order
            .iter()
            .map(|&index| {
                let seat = table.get(index).expect("seat_order only lists occupied seats");
                let strength = match seat.state.status {
                    SeatStatus::Folded => None,
                    _ => seat.state.hole.map(|hole| {
                        let mut cards = Vec::from(hole);
                        cards.extend_from_slice(board.cards());
                        Strength::from(Hand::from(cards))
                    }),
                };
                Settlement {
                    seat_index: index,
                    player_id: seat.player_id,
                    risked: seat.state.total_contributed,
                    reward: 0,
                    status: seat.state.status,
                    strength,
                }
            })
            .collect();
        Self { settlements, seat_order, prev_stake: 0 }
    }

    /// Awards the entire pot to the single remaining player, for the case
    /// where every other seat has folded and no hands need to be compared.
    pub fn award_uncontested(table: &Table, board: &Board, winner: usize, pot: u64) -> Vec<Settlement> {
        let mut showdown = Self::new(table, board);
        for settlement in showdown.settlements.iter_mut() {
            if settlement.seat_index == winner {
                settlement.reward = pot;
            }
        }
        showdown.settlements
    }

    pub fn settle(mut self) -> Vec<Settlement> {
        loop {
            let Some(stake) = self.next_stake() else {
                break;
            };
            self.distribute_layer(stake);
            self.prev_stake = stake;
        }
        self.settlements
    }

    /// The next-higher distinct contribution level among players still
    /// eligible to contest a pot (i.e. who put in more than the previous
    /// layer's stake).
    fn next_stake(&self) -> Option<u64> {
        self.settlements
            .iter()
            .map(|s| s.risked)
            .filter(|&stake| stake > self.prev_stake)
            .min()
    }

    fn distribute_layer(&mut self, stake: u64) {
        let layer: u64 = self
            .settlements
            .iter()
            .map(|s| s.risked.min(stake).saturating_sub(self.prev_stake))
            .sum();
        if layer == 0 {
            return;
        }
        let best = self
            .settlements
            .iter()
            .filter(|s| s.status != SeatStatus::Folded && s.risked >= stake)
            .filter_map(|s| s.strength)
            .max();
        let Some(best) = best else {
            return;
        };
        let winners: Vec<usize> = self
            .seat_order
            .iter()
            .copied()
            .filter(|&i| {
                self.settlements.iter().any(|s| {
                    s.seat_index == i && s.status != SeatStatus::Folded && s.risked >= stake && s.strength == Some(best)
                })
            })
            .collect();
        let share = layer / winners.len() as u64;
        let remainder = layer % winners.len() as u64;
        for (n, &winner) in winners.iter().enumerate() {
            let settlement = self.settlements.iter_mut().find(|s| s.seat_index == winner).unwrap();
            settlement.reward += share;
            if (n as u64) < remainder {
                settlement.reward += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Hole, Rank, Suit};

    fn seat_with(table: &mut Table, id: u64, stack: u64, hole: (Rank, Suit, Rank, Suit)) -> usize {
        let mut state = crate::table::PlayerState::new(stack);
        state.hole = Some(Hole::new(Card::new(hole.0, hole.1), Card::new(hole.2, hole.3)));
        let index = table
            .seat_player(crate::table::Seat { player_id: id, name: format!("p{id}"), state }, None)
            .unwrap();
        index
    }

    #[test]
    fn single_pot_splits_evenly_between_tied_winners() {
        let mut table = Table::new(2);
        let a = seat_with(&mut table, 1, 0, (Rank::Ace, Suit::Spade, Rank::King, Suit::Spade));
        let b = seat_with(&mut table, 2, 0, (Rank::Ace, Suit::Heart, Rank::King, Suit::Heart));
        table.get_mut(a).unwrap().state.total_contributed = 100;
        table.get_mut(b).unwrap().state.total_contributed = 100;
        table.set_button(a).unwrap();
        let mut board = Board::empty();
        board.extend(vec![
            Card::new(Rank::Two, Suit::Club),
            Card::new(Rank::Seven, Suit::Diamond),
            Card::new(Rank::Nine, Suit::Club),
            Card::new(Rank::Jack, Suit::Diamond),
            Card::new(Rank::Three, Suit::Heart),
        ]);
        let settlements = Showdown::new(&table, &board).settle();
        let total_reward: u64 = settlements.iter().map(|s| s.reward).sum();
        assert_eq!(total_reward, 200);
        assert!(settlements.iter().all(|s| s.reward == 100));
    }

    #[test]
    fn side_pot_layer_excludes_short_stack_from_upper_layer() {
        let mut table = Table::new(3);
        let short = seat_with(&mut table, 1, 0, (Rank::Two, Suit::Club, Rank::Two, Suit::Diamond));
        let mid = seat_with(&mut table, 2, 0, (Rank::King, Suit::Spade, Rank::King, Suit::Heart));
        let big = seat_with(&mut table, 3, 0, (Rank::Seven, Suit::Club, Rank::Eight, Suit::Club));
        table.get_mut(short).unwrap().state.total_contributed = 50;
        table.get_mut(mid).unwrap().state.total_contributed = 150;
        table.get_mut(big).unwrap().state.total_contributed = 150;
        table.get_mut(big).unwrap().state.status = SeatStatus::Folded;
        table.set_button(short).unwrap();

        let mut board = Board::empty();
        board.extend(vec![
            Card::new(Rank::Two, Suit::Spade),
            Card::new(Rank::Two, Suit::Heart),
            Card::new(Rank::Nine, Suit::Club),
            Card::new(Rank::Jack, Suit::Diamond),
            Card::new(Rank::Three, Suit::Heart),
        ]);

        let settlements = Showdown::new(&table, &board).settle();
        let total_risked: u64 = settlements.iter().map(|s| s.risked).sum();
        let total_reward: u64 = settlements.iter().map(|s| s.reward).sum();
        assert_eq!(total_risked, total_reward);

        let short_reward = settlements.iter().find(|s| s.seat_index == short).unwrap().reward;
        let mid_reward = settlements.iter().find(|s| s.seat_index == mid).unwrap().reward;
        assert!(short_reward > 0);
        assert!(mid_reward > short_reward);
    }
}
