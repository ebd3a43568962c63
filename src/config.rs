/// Everything needed to start a game, passed once to `Engine::new`. No
/// environment-variable or file-based config surface: this is a library
/// core, not a standalone process.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub small_blind: u64,
    pub big_blind: u64,
    pub ante: u64,
    pub min_players: usize,
    pub max_players: usize,
    pub max_hands: u64,
    /// `None` chooses the button via the same seeded RNG used for
    /// shuffling, keeping an unconfigured start deterministic too.
    pub first_button: Option<usize>,
    /// Seeds the deck shuffle (and first-button choice when unset). Two
    /// engines built with the same config and the same player decisions
    /// produce identical event streams and final stacks.
    pub seed: u64,
    /// When `true`, a rule-violating action becomes an `anyhow::Error`
    /// returned from `step()` instead of a logged fold substitution.
    pub strict: bool,
}

impl GameConfig {
    pub fn new(small_blind: u64, big_blind: u64, min_players: usize, max_players: usize, max_hands: u64, seed: u64) -> Self {
        Self {
            small_blind,
            big_blind,
            ante: 0,
            min_players,
            max_players,
            max_hands,
            first_button: None,
            seed,
            strict: false,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.small_blind > 0, "small blind must be positive");
        anyhow::ensure!(self.big_blind >= self.small_blind, "big blind must be at least the small blind");
        anyhow::ensure!(self.min_players >= 2, "a hand needs at least two players");
        anyhow::ensure!(self.max_players >= self.min_players, "max_players must be at least min_players");
        anyhow::ensure!(self.max_hands > 0, "max_hands must be positive");
        if let Some(seat) = self.first_button {
            anyhow::ensure!(seat < self.max_players, "first_button seat {seat} is out of range");
        }
        Ok(())
    }
}
