use super::card::Card;
use super::deck::Deck;
use super::hole::Hole;
use super::strength::Strength;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Monte Carlo equity estimation: deal out random completions of the board
/// and random opponent holes many times, and report the fraction of
/// trials `hole` strictly beats every opponent. Deterministic given `rng`'s
/// seed, so the same estimate reproduces exactly for logging and tests.
///
/// `min_hole_cards` is the minimum number of the subject's own hole cards a
/// qualifying hand must use (an Omaha-style constraint); Hold'em callers
/// always pass `0`.
pub fn estimate(hole: Hole, board: &[Card], opponents: usize, trials: usize, min_hole_cards: usize, rng: &mut SmallRng) -> f64 {
    assert!(opponents >= 1, "equity needs at least one opponent");
    assert!(trials > 0, "equity needs at least one trial");
    debug_assert!(min_hole_cards <= 2, "Hold'em hole cards never exceed two");

    let mut known = Vec::from(hole);
    known.extend_from_slice(board);
    let unseen = Deck::missing(&known);

    let mut share_total = 0.0f64;

    for _ in 0..trials {
        let mut pool = unseen.clone();
        pool.shuffle(rng);

        let needed_board = 5 - board.len();
        let mut draw = pool.drain(..needed_board + opponents * 2);
        let runout: Vec<Card> = (&mut draw).take(needed_board).collect();
        let mut full_board = board.to_vec();
        full_board.extend(runout);

        let mut hero_cards = Vec::from(hole);
        hero_cards.extend_from_slice(&full_board);
        let hero = Strength::from(super::hand::Hand::from(hero_cards));

        let opp_cards: Vec<Card> = draw.collect();
        let mut best_opponent: Option<Strength> = None;
        for chunk in opp_cards.chunks(2) {
            let mut cards = chunk.to_vec();
            cards.extend_from_slice(&full_board);
            let strength = Strength::from(super::hand::Hand::from(cards));
            best_opponent = Some(match best_opponent {
                Some(best) if best >= strength => best,
                _ => strength,
            });
        }
        let best_opponent = best_opponent.expect("at least one opponent dealt");

        // A tie does not count as a win: only a strict win over every
        // opponent is credited.
        if hero > best_opponent {
            share_total += 1.0;
        }
    }

    share_total / trials as f64
}
