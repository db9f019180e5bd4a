//! Random source seam
//!
//! Every stochastic choice the simulator makes goes through `pick`, so a
//! test can drive an episode with a fixed index sequence.

pub trait RandomSource: Send {
    /// Uniform index in `0..len`; `len` is always at least 1
    fn pick(&mut self, len: usize) -> usize;
}

/// Choose one element uniformly, `None` for an empty slice
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    // Out-of-range picks clamp to the last element
    let index = rng.pick(items.len()).min(items.len() - 1);
    items.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(usize);

    impl RandomSource for Always {
        fn pick(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    #[test]
    fn test_choose_empty() {
        let items: [u8; 0] = [];
        assert!(choose(&mut Always(0), &items).is_none());
    }

    #[test]
    fn test_choose_clamps() {
        let items = ["a", "b"];
        assert_eq!(choose(&mut Always(1), &items), Some(&"b"));
        assert_eq!(choose(&mut Always(9), &items), Some(&"b"));
    }
}
