//! Quick-select letter (invlet) bookkeeping
//!
//! Letters are drawn from a–z then A–Z. The selector claims every
//! letter items already hold, then fills the gaps from the first free
//! letter on. When the pool is exhausted the overflow symbol is used,
//! which is display-only and never matches a keypress.

/// Number of assignable letters (a-z, A-Z).
pub const POOL_SIZE: usize = 52;

/// Overflow symbol shown when no letter is free.
pub const NOINVSYM: char = '#';

/// Tracks which quick-select letters are claimed.
#[derive(Debug, Clone)]
pub struct InvletPool {
    in_use: [bool; POOL_SIZE],
}

impl Default for InvletPool {
    fn default() -> Self {
        InvletPool {
            in_use: [false; POOL_SIZE],
        }
    }
}

fn letter_index(c: char) -> Option<usize> {
    match c {
        'a'..='z' => Some(c as usize - 'a' as usize),
        'A'..='Z' => Some(c as usize - 'A' as usize + 26),
        _ => None,
    }
}

fn index_letter(i: usize) -> char {
    if i < 26 {
        (b'a' + i as u8) as char
    } else {
        (b'A' + (i - 26) as u8) as char
    }
}

impl InvletPool {
    pub fn new() -> Self {
        InvletPool::default()
    }

    /// Claim `c` if it is a pool letter and still free.
    pub fn claim(&mut self, c: char) -> bool {
        match letter_index(c) {
            Some(i) if !self.in_use[i] => {
                self.in_use[i] = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_claimed(&self, c: char) -> bool {
        letter_index(c).is_some_and(|i| self.in_use[i])
    }

    /// Claim and return the first free letter. Returns `None` when
    /// the pool is exhausted; callers display [`NOINVSYM`] then.
    pub fn next_free(&mut self) -> Option<char> {
        let i = self.in_use.iter().position(|used| !used)?;
        self.in_use[i] = true;
        Some(index_letter(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pool_has_every_letter_free() {
        let pool = InvletPool::new();
        for c in ('a'..='z').chain('A'..='Z') {
            assert!(!pool.is_claimed(c));
        }
    }

    #[test]
    fn claim_rejects_taken_and_non_letters() {
        let mut pool = InvletPool::new();
        assert!(pool.claim('q'));
        assert!(pool.is_claimed('q'));
        assert!(!pool.claim('q'));
        assert!(!pool.claim('#'));
        assert!(!pool.claim('3'));
    }

    #[test]
    fn assigns_lowercase_before_uppercase() {
        let mut pool = InvletPool::new();
        for expected in 'a'..='z' {
            assert_eq!(pool.next_free(), Some(expected));
        }
        assert_eq!(pool.next_free(), Some('A'));
    }

    #[test]
    fn exhausted_pool_yields_none() {
        let mut pool = InvletPool::new();
        for _ in 0..POOL_SIZE {
            assert!(pool.next_free().is_some());
        }
        assert_eq!(pool.next_free(), None);
    }
}
