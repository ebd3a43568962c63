use crate::cards::Hole;
use std::fmt::{Display, Formatter};

/// A seated player's participation state for the current street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SeatStatus {
    Active,
    Folded,
    AllIn,
}

impl Display for SeatStatus {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SeatStatus::Active => "active",
                SeatStatus::Folded => "folded",
                SeatStatus::AllIn => "all-in",
            }
        )
    }
}

/// Per-hand mutable record for one seated player. Chip invariants are
/// maintained by the betting engine, never mutated directly elsewhere.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlayerState {
    pub stack: u64,
    pub hole: Option<Hole>,
    pub current_bet: u64,
    pub total_contributed: u64,
    pub acted_this_street: bool,
    /// Set when a non-reopening short all-in forces this seat to act again
    /// without granting it raise rights: it may only call or fold until the
    /// street resets or a legal raise reopens the action for everyone.
    pub capped: bool,
    pub status: SeatStatus,
}

impl PlayerState {
    pub fn new(stack: u64) -> Self {
        Self {
            stack,
            hole: None,
            current_bet: 0,
            total_contributed: 0,
            acted_this_street: false,
            capped: false,
            status: SeatStatus::Active,
        }
    }

    pub fn reset_for_street(&mut self) {
        self.current_bet = 0;
        self.capped = false;
        if self.status == SeatStatus::Active {
            self.acted_this_street = false;
        }
    }

    pub fn reset_for_hand(&mut self, hole: Option<Hole>) {
        self.hole = hole;
        self.current_bet = 0;
        self.total_contributed = 0;
        self.acted_this_street = false;
        self.capped = false;
        self.status = if self.stack == 0 { SeatStatus::AllIn } else { SeatStatus::Active };
    }
}

/// A seated player's identity plus its `PlayerState`. The seat stores no
/// back-reference to the table or the game; the table holds seats by
/// index, and a handler that needs "who is this" looks up the seat index
/// it was given, never the other way around.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Seat {
    pub player_id: u64,
    pub name: String,
    pub state: PlayerState,
}

impl Display for Seat {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:<12} {:<8} stack={:<6} bet={}",
            self.name, self.state.status, self.state.stack, self.state.current_bet
        )
    }
}

/// Fixed-capacity ring of seats. `button`, when set, always references an
/// occupied seat.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Table {
    seats: Vec<Option<Seat>>,
    button: Option<usize>,
}

impl Table {
    pub fn new(capacity: usize) -> Self {
        Self {
            seats: vec![None; capacity],
            button: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.seats.len()
    }

    pub fn button(&self) -> Option<usize> {
        self.button
    }

    pub fn set_button(&mut self, index: usize) -> anyhow::Result<()> {
        anyhow::ensure!(self.seats[index].is_some(), "cannot set button on empty seat {index}");
        self.button = Some(index);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Seat> {
        self.seats.get(index).and_then(|s| s.as_ref())
    }
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Seat> {
        self.seats.get_mut(index).and_then(|s| s.as_mut())
    }

    pub fn occupied_indices(&self) -> Vec<usize> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|_| i))
            .collect()
    }
    pub fn occupied_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    /// Seats a player at `index`, or the first free seat if `index` is
    /// `None`. Errors if the chosen seat is taken or the table is full.
    pub fn seat_player(&mut self, seat: Seat, index: Option<usize>) -> anyhow::Result<usize> {
        let index = match index {
            Some(i) => {
                anyhow::ensure!(i < self.seats.len(), "seat index {i} out of range");
                anyhow::ensure!(self.seats[i].is_none(), "seat {i} is already occupied");
                i
            }
            None => self
                .seats
                .iter()
                .position(|s| s.is_none())
                .ok_or_else(|| anyhow::anyhow!("table is full"))?,
        };
        self.seats[index] = Some(seat);
        Ok(index)
    }

    /// Clears a seat. Errors on removing a seat mid-hand is a caller
    /// responsibility (the engine checks `Stage` before calling this).
    pub fn remove_player(&mut self, index: usize) -> anyhow::Result<Seat> {
        self.seats
            .get_mut(index)
            .and_then(|s| s.take())
            .ok_or_else(|| anyhow::anyhow!("seat {index} is not occupied"))
    }

    /// Next occupied seat strictly after `from`, wrapping around, optionally
    /// restricted to seats whose status is `Active`.
    pub fn next_occupied(&self, from: usize, active_only: bool) -> Option<usize> {
        let n = self.seats.len();
        if n == 0 {
            return None;
        }
        (1..=n).map(|step| (from + step) % n).find(|&i| match &self.seats[i] {
            Some(seat) => !active_only || seat.state.status == SeatStatus::Active,
            None => false,
        })
    }

    /// Advances the button to the next occupied seat, initializing to the
    /// first occupied seat if unset.
    pub fn move_button(&mut self) -> anyhow::Result<()> {
        let next = match self.button {
            Some(b) => self.next_occupied(b, false),
            None => self.occupied_indices().first().copied(),
        };
        self.button = Some(next.ok_or_else(|| anyhow::anyhow!("no occupied seats to set button on"))?);
        Ok(())
    }

    pub fn reset_for_street(&mut self) {
        for seat in self.seats.iter_mut().flatten() {
            seat.state.reset_for_street();
        }
    }

    /// Count of seats still contesting the pot (not folded).
    pub fn players_in_hand(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|s| s.state.status != SeatStatus::Folded)
            .count()
    }

    pub fn active_count(&self) -> usize {
        self.seats
            .iter()
            .flatten()
            .filter(|s| s.state.status == SeatStatus::Active)
            .count()
    }

    /// Seats still holding cards, in button-relative order starting left of
    /// the button. Used for showdown's remainder-chip tie-break.
    pub fn seats_left_of_button(&self) -> Vec<usize> {
        let Some(button) = self.button else {
            return self.occupied_indices();
        };
        let n = self.seats.len();
        (1..=n)
            .map(|step| (button + step) % n)
            .filter(|i| self.seats[*i].is_some())
            .collect()
    }
}
