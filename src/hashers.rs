use core::hash::BuildHasherDefault;
use core::hash::Hasher;

/// An identity hasher for keys that are already small integers.
///
/// The hash of a key is its own bit pattern, zero-extended: `write_u32(7)`
/// finishes as `7`. This mirrors the classic "direct" hash used for
/// integer-valued keys and gives perfectly deterministic, collision-free
/// hashing as long as the keys themselves are distinct integers no wider
/// than 64 bits.
///
/// Only the last integer written is retained; hashing a composite type
/// through this hasher is a misuse and will collide wildly.
///
/// # Examples
///
/// ```rust
/// use core::hash::BuildHasher;
///
/// use tri_hash::hashers::DirectState;
///
/// let state = DirectState::default();
/// assert_eq!(state.hash_one(42u64), 42);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectHasher {
    state: u64,
}

impl Hasher for DirectHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        let mut buf = [0u8; 8];
        let n = bytes.len().min(8);
        buf[..n].copy_from_slice(&bytes[..n]);
        self.state = u64::from_le_bytes(buf);
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.state = u64::from(i);
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.state = u64::from(i);
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.state = u64::from(i);
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.state = i;
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.state = i as u64;
    }
}

/// A `BuildHasher` producing [`DirectHasher`]s.
pub type DirectState = BuildHasherDefault<DirectHasher>;

/// The DJBX33A string hash (`h = h * 33 + byte`, starting from 5381),
/// accumulating signed byte values.
///
/// This is the widely used "djb" hash. It is fast and adequate for
/// friendly inputs, but it is **not** collision-resistant: an adversary
/// can construct arbitrarily many colliding keys with no effort, and it
/// already collides on some two-character strings. Do not use it for keys
/// you do not control; supply a keyed hasher instead.
///
/// # Examples
///
/// ```rust
/// use core::hash::Hasher;
///
/// use tri_hash::hashers::DjbHasher;
///
/// let mut hasher = DjbHasher::default();
/// hasher.write(b"");
/// assert_eq!(hasher.finish(), 5381);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DjbHasher {
    state: u32,
}

impl Default for DjbHasher {
    #[inline]
    fn default() -> Self {
        Self { state: 5381 }
    }
}

impl Hasher for DjbHasher {
    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.state)
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            // Signed-byte accumulation, matching the original formulation.
            let b = b as i8 as i32 as u32;
            self.state = self
                .state
                .wrapping_shl(5)
                .wrapping_add(self.state)
                .wrapping_add(b);
        }
    }
}

/// A `BuildHasher` producing [`DjbHasher`]s.
pub type DjbState = BuildHasherDefault<DjbHasher>;
