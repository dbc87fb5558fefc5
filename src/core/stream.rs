//! Replayable input stream with a cursor.

use super::error::StreamError;

/// An ordered sequence of inputs plus a read cursor.
///
/// Works like a queue that can be rewound: the run loop draws inputs with
/// [`next_input`](Self::next_input) until [`is_at_end`](Self::is_at_end),
/// and [`reset`](Self::reset) moves the cursor back to the first element
/// without discarding anything. Duplicates are allowed and order is kept.
///
/// # Example
///
/// ```rust
/// use statewise::core::InputStream;
///
/// let mut stream: InputStream<char> = "ab".chars().collect();
/// assert_eq!(stream.next_input(), Ok(&'a'));
/// assert_eq!(stream.next_input(), Ok(&'b'));
/// assert!(stream.is_at_end());
///
/// stream.reset();
/// assert_eq!(stream.position(), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputStream<I> {
    items: Vec<I>,
    cursor: usize,
}

impl<I> InputStream<I> {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
        }
    }

    /// Append an input at the end of the stream.
    pub fn push(&mut self, input: I) {
        self.items.push(input);
    }

    /// Move the cursor back to the first input.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// True once every input has been drawn.
    pub fn is_at_end(&self) -> bool {
        self.cursor == self.items.len()
    }

    /// Return the input under the cursor and advance past it.
    ///
    /// Drawing past the end is a caller error and yields
    /// [`StreamError::Exhausted`]; the cursor does not move in that case.
    pub fn next_input(&mut self) -> Result<&I, StreamError> {
        let position = self.cursor;
        match self.items.get(position) {
            Some(input) => {
                self.cursor += 1;
                Ok(input)
            }
            None => Err(StreamError::Exhausted {
                position,
                len: self.items.len(),
            }),
        }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inputs not yet drawn.
    pub fn remaining(&self) -> &[I] {
        &self.items[self.cursor..]
    }

    /// All inputs, regardless of the cursor.
    pub fn as_slice(&self) -> &[I] {
        &self.items
    }

    /// Drop every input and rewind.
    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor = 0;
    }
}

impl<I> From<Vec<I>> for InputStream<I> {
    fn from(items: Vec<I>) -> Self {
        Self { items, cursor: 0 }
    }
}

impl<I> FromIterator<I> for InputStream<I> {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<I> Extend<I> for InputStream<I> {
    fn extend<T: IntoIterator<Item = I>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}
