//! Growable output buffer.
//!
//! An owned byte accumulator with amortized O(1) appends: capacity doubles
//! (repeatedly, if one doubling is not enough) whenever a write would
//! overflow it. Callers never see the capacity arithmetic; they append,
//! pad, and finally take the accumulated bytes with [`OutBuf::finish`].

/// Initial capacity of a fresh buffer, in bytes.
const INITIAL_CAPACITY: usize = 120;

/// Single-use growable byte buffer for one render call.
///
/// Invariant: `len <= data.len()`, and `data.len()` is always a power-of-two
/// multiple of the initial capacity.
#[derive(Debug)]
pub struct OutBuf {
    data: Vec<u8>,
    len: usize,
}

impl OutBuf {
    /// Create an empty buffer with the default initial capacity.
    pub fn new() -> Self {
        Self {
            data: vec![0; INITIAL_CAPACITY],
            len: 0,
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Ensure room for `extra` more bytes, doubling capacity as needed.
    pub fn reserve(&mut self, extra: usize) {
        if self.len + extra >= self.data.len() {
            let mut cap = self.data.len().max(1);
            while self.len + extra >= cap {
                cap *= 2;
            }
            self.data.resize(cap, 0);
        }
    }

    /// Append a single byte.
    pub fn push(&mut self, byte: u8) {
        self.reserve(1);
        self.data[self.len] = byte;
        self.len += 1;
    }

    /// Bulk-copy `bytes` onto the end of the buffer.
    pub fn append(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        self.data[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    /// Append `count` copies of `byte`.
    pub fn pad(&mut self, byte: u8, count: usize) {
        self.reserve(count);
        for _ in 0..count {
            self.data[self.len] = byte;
            self.len += 1;
        }
    }

    /// Rewrite the contiguous run of `.` bytes starting at `pos` with `to`.
    ///
    /// Used by the integer renderer to turn `.`-padding into the base's
    /// all-ones digit after a dotted negative number has been assembled.
    pub(crate) fn rewrite_dot_run(&mut self, pos: usize, to: u8) {
        let mut i = pos;
        while i < self.len && self.data[i] == b'.' {
            self.data[i] = to;
            i += 1;
        }
    }

    /// Take ownership of the accumulated bytes as the result string.
    ///
    /// The buffer is consumed; it cannot be reused. Byte sequences that are
    /// not valid UTF-8 (possible via `%c` of a high byte) are replaced
    /// lossily.
    pub fn finish(self) -> String {
        let mut data = self.data;
        data.truncate(self.len);
        match String::from_utf8(data) {
            Ok(s) => s,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }
}

impl Default for OutBuf {
    fn default() -> Self {
        Self::new()
    }
}
