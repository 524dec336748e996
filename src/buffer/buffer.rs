//! `TextBuffer`: A growable, always-terminated byte buffer.
//!
//! The edit buffer, every intermediate pipeline stage, and each wrapped
//! line are `TextBuffer`s. Storage is a single contiguous `Vec<u8>` that
//! always ends in a terminator byte one past the content.

use crate::error::Result;
use std::borrow::Cow;

/// Capacity of a freshly created buffer, terminator included.
pub const INITIAL_CAPACITY: usize = 16;

/// Byte stored one past the last content byte.
pub const TERMINATOR: u8 = 0;

/// A growable byte buffer with O(1) amortized append.
///
/// The buffer tracks its own logical capacity so growth follows a strict
/// doubling policy: when an append would not fit, the capacity doubles
/// until the content plus terminator fits. Capacity never shrinks except
/// through [`TextBuffer::release`].
///
/// # Invariants
///
/// - `capacity() >= len() + 1` while storage is held
/// - `as_bytes_with_terminator()` always ends in [`TERMINATOR`]
#[derive(PartialEq, Eq)]
pub struct TextBuffer {
    /// Content followed by the terminator. Empty after release.
    data: Vec<u8>,
    /// Logical capacity, terminator included.
    capacity: usize,
}

impl TextBuffer {
    /// Create an empty buffer with the initial capacity.
    pub fn new() -> Self {
        let mut data = Vec::with_capacity(INITIAL_CAPACITY);
        data.push(TERMINATOR);
        Self {
            data,
            capacity: INITIAL_CAPACITY,
        }
    }

    /// Create a buffer holding a copy of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut buffer = Self::new();
        buffer.append(bytes)?;
        Ok(buffer)
    }

    /// Number of content bytes (terminator excluded).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len().saturating_sub(1)
    }

    /// Check if the buffer holds no content.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Logical capacity in bytes, terminator included.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The content bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len()]
    }

    /// The content bytes followed by the terminator.
    ///
    /// Empty after [`TextBuffer::release`].
    #[inline]
    pub fn as_bytes_with_terminator(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the content bytes, for in-place transforms.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.data[..len]
    }

    /// The content as text, replacing invalid UTF-8.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Append `bytes` to the end of the buffer.
    ///
    /// Returns the number of bytes appended. On allocation failure the
    /// buffer is left exactly as it was.
    pub fn append(&mut self, bytes: &[u8]) -> Result<usize> {
        let len = self.len();
        let required = len + bytes.len() + 1;
        if required > self.capacity || self.data.is_empty() {
            self.grow(required)?;
        }

        self.data.truncate(len);
        self.data.extend_from_slice(bytes);
        self.data.push(TERMINATOR);
        Ok(bytes.len())
    }

    /// Append a single byte.
    #[inline]
    pub fn append_char(&mut self, byte: u8) -> Result<usize> {
        self.append(&[byte])
    }

    /// Remove the last byte. Does nothing on an empty buffer.
    pub fn delete_last_char(&mut self) {
        let len = self.len();
        if len > 0 {
            self.data[len - 1] = TERMINATOR;
            self.data.truncate(len);
        }
    }

    /// Replace the whole content with `bytes`, keeping the capacity.
    pub fn replace_with(&mut self, bytes: &[u8]) -> Result<()> {
        let mut fresh = Self::new();
        fresh.grow(self.capacity.max(bytes.len() + 1))?;
        fresh.append(bytes)?;
        *self = fresh;
        Ok(())
    }

    /// Free the storage. The buffer becomes empty with zero capacity.
    ///
    /// Calling this twice is harmless, and a later append regrows from
    /// [`INITIAL_CAPACITY`].
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.capacity = 0;
    }

    /// Double the capacity until `required` bytes fit.
    fn grow(&mut self, required: usize) -> Result<()> {
        let mut new_capacity = self.capacity.max(INITIAL_CAPACITY);
        while new_capacity < required {
            new_capacity = new_capacity.saturating_mul(2);
        }

        self.data.try_reserve_exact(new_capacity - self.data.len())?;
        if self.data.is_empty() {
            self.data.push(TERMINATOR);
        }
        self.capacity = new_capacity;
        Ok(())
    }
}

impl Clone for TextBuffer {
    fn clone(&self) -> Self {
        let mut data = Vec::with_capacity(self.capacity);
        data.extend_from_slice(&self.data);
        Self {
            data,
            capacity: self.capacity,
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for TextBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("content", &self.to_string_lossy())
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
