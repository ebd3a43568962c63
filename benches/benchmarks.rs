criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        evaluating_seven_card_hand,
        scoring_five_card_hand,
        dealing_a_full_hand,
        estimating_heads_up_equity,
}

fn evaluating_seven_card_hand(c: &mut criterion::Criterion) {
    let cards = sample_seven_cards();
    let hand = Hand::from(cards);
    c.bench_function("evaluate a 7-card hand", |b| {
        b.iter(|| Evaluator::from(hand).find_ranking())
    });
}

fn scoring_five_card_hand(c: &mut criterion::Criterion) {
    let cards = sample_seven_cards()[..5].to_vec();
    let hand = Hand::from(cards);
    c.bench_function("score a 5-card hand", |b| {
        b.iter(|| Strength::from(hand).score())
    });
}

fn dealing_a_full_hand(c: &mut criterion::Criterion) {
    c.bench_function("shuffle and deal a 9-handed hand", |b| {
        b.iter(|| {
            let mut deck = Deck::new(7);
            for _ in 0..9 {
                deck.deal(2).unwrap();
            }
            deck.deal(5).unwrap();
        })
    });
}

fn estimating_heads_up_equity(c: &mut criterion::Criterion) {
    let hole = Hole::new(Card::new(Rank::Ace, Suit::Spade), Card::new(Rank::King, Suit::Spade));
    let mut rng = SmallRng::seed_from_u64(11);
    c.bench_function("estimate heads-up preflop equity (2000 trials)", |b| {
        b.iter(|| equity::estimate(hole, &[], 1, 2000, 0, &mut rng))
    });
}

fn sample_seven_cards() -> Vec<Card> {
    vec![
        Card::new(Rank::Ace, Suit::Spade),
        Card::new(Rank::King, Suit::Spade),
        Card::new(Rank::Queen, Suit::Spade),
        Card::new(Rank::Jack, Suit::Spade),
        Card::new(Rank::Nine, Suit::Heart),
        Card::new(Rank::Two, Suit::Diamond),
        Card::new(Rank::Three, Suit::Club),
    ]
}

use holdem_engine::cards::card::Card;
use holdem_engine::cards::deck::Deck;
use holdem_engine::cards::equity;
use holdem_engine::cards::evaluator::Evaluator;
use holdem_engine::cards::hand::Hand;
use holdem_engine::cards::hole::Hole;
use holdem_engine::cards::rank::Rank;
use holdem_engine::cards::strength::Strength;
use holdem_engine::cards::suit::Suit;
use rand::rngs::SmallRng;
use rand::SeedableRng;
