//! Circular seating search.
//!
//! "Left" is the next seat in the stored seating order, wrapping around.

use crate::domain::state::PlayerId;

/// First player left of `from` for whom `is_alive` holds.
///
/// Walks at most one full revolution starting one seat past `from`, so `from`
/// itself is the last candidate. Returns `None` when `from` is not seated or
/// nobody qualifies.
pub fn next_living_left<'a, F>(seats: &'a [PlayerId], from: &PlayerId, is_alive: F) -> Option<&'a PlayerId>
where
    F: Fn(&PlayerId) -> bool,
{
    let start = seats.iter().position(|p| p == from)?;
    (1..=seats.len())
        .map(|offset| &seats[(start + offset) % seats.len()])
        .find(|candidate| is_alive(candidate))
}
