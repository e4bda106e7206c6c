//! Dense particle storage with removal during update.
//!
//! Particles live in a plain `Vec`. [`ParticleStore::update`] walks it once,
//! and a particle whose update returns [`Fate::Remove`] is swap-removed on the
//! spot. The element swapped into its slot has not been visited yet, so every
//! live particle is updated exactly once per pass without iterator
//! invalidation. Iteration order is therefore not stable, which is fine:
//! particles never interact with each other.

/// What should happen to a particle after its update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    /// Keep simulating next tick.
    Keep,
    /// Drop from the store.
    Remove,
}

/// Unordered collection of live particles.
#[derive(Debug, Clone)]
pub struct ParticleStore<P> {
    particles: Vec<P>,
}

impl<P> ParticleStore<P> {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn insert(&mut self, particle: P) {
        self.particles.push(particle);
    }

    /// Drop every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Replace the whole population.
    pub fn replace(&mut self, particles: Vec<P>) {
        self.particles = particles;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, P> {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[P] {
        &self.particles
    }

    /// Update every particle once, removing those that report [`Fate::Remove`].
    ///
    /// Returns the number of particles removed.
    pub fn update<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(&mut P) -> Fate,
    {
        let mut removed = 0;
        let mut i = 0;
        while i < self.particles.len() {
            match f(&mut self.particles[i]) {
                Fate::Keep => i += 1,
                Fate::Remove => {
                    self.particles.swap_remove(i);
                    removed += 1;
                }
            }
        }
        removed
    }
}

impl<P> Default for ParticleStore<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Extend<P> for ParticleStore<P> {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.particles.extend(iter);
    }
}

impl<'a, P> IntoIterator for &'a ParticleStore<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_visits_each_once() {
        let mut store: ParticleStore<(u32, u32)> = ParticleStore::new();
        store.extend((0..10).map(|i| (i, 0)));

        let removed = store.update(|p| {
            p.1 += 1;
            if p.0 % 3 == 0 {
                Fate::Remove
            } else {
                Fate::Keep
            }
        });

        assert_eq!(removed, 4); // 0, 3, 6, 9
        assert_eq!(store.len(), 6);
        assert!(store.iter().all(|p| p.1 == 1));
        assert!(store.iter().all(|p| p.0 % 3 != 0));
    }

    #[test]
    fn test_remove_all() {
        let mut store: ParticleStore<u8> = ParticleStore::new();
        store.extend([1, 2, 3]);
        assert_eq!(store.update(|_| Fate::Remove), 3);
        assert!(store.is_empty());
    }

    #[test]
    fn test_replace() {
        let mut store = ParticleStore::new();
        store.insert(1);
        store.replace(vec![5, 6]);
        assert_eq!(store.as_slice(), &[5, 6]);
    }
}
