//! RNG seed derivation for deterministic shuffles.
//!
//! Every shuffle in a session draws its seed from the session's base seed,
//! so a stored session replays identically given the same requests.

/// Derive the seed for the opening shuffle of the full deck.
pub fn derive_opening_seed(game_seed: u64) -> u64 {
    game_seed.wrapping_add(1) // Offset to distinguish from reshuffle seeds
}

/// Derive the seed for recycling the trash into a fresh draw pile.
///
/// Unique per (session, round, reshuffle number). The reshuffle number is
/// session-wide, so two reshuffles in the same round still differ.
pub fn derive_reshuffle_seed(game_seed: u64, round: u32, reshuffle_no: u32) -> u64 {
    game_seed
        .wrapping_add((round as u64).wrapping_mul(1_000_000))
        .wrapping_add((reshuffle_no as u64).wrapping_mul(100))
        .wrapping_add(2)
}
