use rand::Rng;

/// Source of randomness for draws
pub trait Chooser: Send + Sync {
    /// Pick an index in `0..len`. Never called with `len == 0`.
    fn choose(&self, len: usize) -> usize;
}

/// Uniform choice backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngChooser;

impl Chooser for ThreadRngChooser {
    fn choose(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}
