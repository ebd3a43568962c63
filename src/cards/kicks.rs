/// A hand's kicker cards, kept as a 13-bit rank mask.
///
/// Structurally identical to a rank mask, semantically different: `Ord`
/// here compares "which ranks are present" lexicographically from the high
/// end, which is exactly tie-break-by-kicker.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Kickers(u16);

impl From<u16> for Kickers {
    fn from(mask: u16) -> Self {
        Self(mask)
    }
}
impl From<Kickers> for u16 {
    fn from(k: Kickers) -> Self {
        k.0
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:013b}", self.0)
    }
}
