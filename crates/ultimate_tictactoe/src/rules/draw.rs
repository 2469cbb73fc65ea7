//! Fullness check used for draw detection.

/// Checks if every slot holds a mark.
///
/// A full grid with no completed line is drawn.
pub fn is_full(slots: &[Option<crate::Mark>; 9]) -> bool {
    slots.iter().all(Option::is_some)
}
