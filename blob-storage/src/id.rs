use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{BlobError, BlobResult};

pub const DEFAULT_ID_LENGTH: usize = 12;

/// Produces the short public identifiers that name stored objects.
///
/// Identifiers are hex-encoded random bytes truncated to a fixed length, so
/// they never contain the composite-name separator. When the random source
/// fails the generator degrades to a nanosecond timestamp instead of failing
/// the upload.
#[derive(Debug)]
pub struct IdGenerator<R = OsRng> {
    rng: Mutex<R>,
    length: usize,
}

impl IdGenerator<OsRng> {
    pub fn new(length: usize) -> BlobResult<Self> {
        Self::with_rng(OsRng, length)
    }
}

impl Default for IdGenerator<OsRng> {
    fn default() -> Self {
        Self {
            rng: Mutex::new(OsRng),
            length: DEFAULT_ID_LENGTH,
        }
    }
}

impl<R: RngCore> IdGenerator<R> {
    pub fn with_rng(rng: R, length: usize) -> BlobResult<Self> {
        if length == 0 {
            return Err(BlobError::InvalidIdLength);
        }
        Ok(Self {
            rng: Mutex::new(rng),
            length,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn generate(&self) -> String {
        let mut bytes = vec![0u8; self.length.div_ceil(2)];
        // A poisoned lock still guards a usable rng.
        let filled = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .try_fill_bytes(&mut bytes);
        match filled {
            Ok(()) => {
                let mut id = hex::encode(bytes);
                id.truncate(self.length);
                id
            }
            Err(err) => {
                tracing::warn!(error = %err, "random source unavailable, falling back to timestamp id");
                timestamp_id()
            }
        }
    }
}

fn timestamp_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    nanos.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct OfflineRng;

    impl RngCore for OfflineRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0)
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source offline"))
        }
    }

    #[test]
    fn test_default_ids_are_twelve_hex_chars() {
        let id = IdGenerator::default().generate();
        assert_eq!(id.len(), 12);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_odd_lengths_are_respected() {
        let generator = IdGenerator::new(7).unwrap();
        assert_eq!(generator.generate().len(), 7);
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(matches!(IdGenerator::new(0), Err(BlobError::InvalidIdLength)));
    }

    #[test]
    fn test_no_duplicates_over_many_ids() {
        let generator = IdGenerator::default();
        let ids: HashSet<String> = (0..5_000).map(|_| generator.generate()).collect();
        assert_eq!(ids.len(), 5_000);
    }

    #[test]
    fn test_seeded_rng_advances_between_ids() {
        let generator = IdGenerator::with_rng(StdRng::seed_from_u64(7), 12).unwrap();
        let ids: HashSet<String> = (0..100).map(|_| generator.generate()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_fallback_uses_timestamp() {
        let generator = IdGenerator::with_rng(OfflineRng, 12).unwrap();
        let id = generator.generate();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_digit()));
        assert!(!id.contains(crate::object::SEPARATOR));
    }
}
