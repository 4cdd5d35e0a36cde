//! Scripted escape pattern used while the screen stays frozen.

use crate::types::Primitive;

/// Fixed escape sequence: directional taps mixed with menu and interact taps.
pub const UNBLOCK_PATTERN: [Primitive; 15] = [
    Primitive::Left,
    Primitive::Right,
    Primitive::Up,
    Primitive::Down,
    Primitive::Left,
    Primitive::Up,
    Primitive::Right,
    Primitive::Down,
    Primitive::Menu,
    Primitive::Interact,
    Primitive::Up,
    Primitive::Up,
    Primitive::Right,
    Primitive::Down,
    Primitive::Left,
];

/// Cycles through [`UNBLOCK_PATTERN`].
///
/// The cursor is never reset, so a re-triggered override resumes where the
/// previous one stopped.
#[derive(Debug, Default, Clone)]
pub struct UnblockRoutine {
    cursor: usize,
}

impl UnblockRoutine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `pattern[cursor % len]` and advances the cursor.
    pub fn next_step(&mut self) -> Primitive {
        let step = UNBLOCK_PATTERN[self.cursor % UNBLOCK_PATTERN.len()];
        self.cursor = self.cursor.wrapping_add(1);
        step
    }

    /// Number of steps handed out so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Iterator for UnblockRoutine {
    type Item = Primitive;

    fn next(&mut self) -> Option<Primitive> {
        Some(self.next_step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nth_step_follows_pattern_modulo_length() {
        let mut routine = UnblockRoutine::new();
        for n in 0..45 {
            assert_eq!(routine.next_step(), UNBLOCK_PATTERN[n % 15]);
        }
        assert_eq!(routine.cursor(), 45);
    }

    #[test]
    fn iterator_resumes_from_cursor() {
        let mut routine = UnblockRoutine::new();
        let first: Vec<_> = routine.by_ref().take(3).collect();
        assert_eq!(first, vec![Primitive::Left, Primitive::Right, Primitive::Up]);
        assert_eq!(routine.next(), Some(Primitive::Down));
    }
}
