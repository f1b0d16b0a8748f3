//! Chat room identifiers
//!
//! A two-party chat room is keyed by the sorted join of the participant
//! IDs, so both directions of a conversation map to the same room.

use super::Snowflake;

/// Deterministic room identifier for a two-party chat.
pub fn room_id(a: Snowflake, b: Snowflake) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    format!("{lo}_{hi}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_order_independent() {
        let a = Snowflake::new(17);
        let b = Snowflake::new(3);
        assert_eq!(room_id(a, b), room_id(b, a));
        assert_eq!(room_id(a, b), "3_17");
    }

    #[test]
    fn self_room_is_stable() {
        let a = Snowflake::new(5);
        assert_eq!(room_id(a, a), "5_5");
    }
}
