//! Provide the field-name index map, based on *hashbrown* and *foldhash*.
//!
//! Field names are short and fully controlled by the host, so a fixed
//! seed keeps lookups deterministic across runs.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x5E1F_A7C3_09D4_B1E2);

/// Hash state used by every [`HashMap`] in this crate.
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

#[cfg(test)]
mod tests {
    use core::hash::{BuildHasher, Hash, Hasher};

    use super::FixedHashState;

    #[test]
    fn fixed_state_is_stable() {
        let hash = |s: &str| {
            let mut hasher = FixedHashState.build_hasher();
            s.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash("damage"), hash("damage"));
        assert_ne!(hash("damage"), hash("range"));
    }
}
