use crate::constants::DEFAULT_TOKEN_BUFFER_CAPACITY;
use crate::error::Result;

/// Growable buffer the current token is copied into before emission.
///
/// Owned by a single tokenize call. Capacity only grows, and every
/// allocation goes through `try_reserve_exact` so exhaustion surfaces as
/// [`crate::MecabError::OutOfMemory`] instead of aborting.
#[derive(Debug)]
pub(crate) struct TokenBuffer {
    bytes: Vec<u8>,
}

impl TokenBuffer {
    pub(crate) fn with_default_capacity() -> Result<Self> {
        Self::with_capacity(DEFAULT_TOKEN_BUFFER_CAPACITY)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(capacity)?;
        Ok(Self { bytes })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Replaces the contents with `surface`, growing to fit if needed.
    pub(crate) fn fill(&mut self, surface: &[u8]) -> Result<&[u8]> {
        self.bytes.clear();
        if surface.len() > self.bytes.capacity() {
            self.bytes.try_reserve_exact(surface.len())?;
        }
        self.bytes.extend_from_slice(surface);
        Ok(&self.bytes)
    }
}
