//! Generic logic for code listings.

use std::slice::Iter;

/// An ordered sequence of emitted lines. Fragments are built bottom-up and
/// spliced into their parent's listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    lines: Vec<T>,
}

impl<T> Listing<T> {
    pub fn new() -> Self {
        Self { lines: vec![] }
    }

    pub fn push(&mut self, line: T) {
        self.lines.push(line);
    }

    /// Moves all lines of `other` to the end of this listing.
    pub fn append(&mut self, other: Listing<T>) {
        self.lines.extend(other.lines);
    }

    pub fn iter(&self) -> Iter<T> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut first = Listing::new();
        first.push(1);
        first.push(2);
        let mut second = Listing::new();
        second.push(3);

        first.append(second);

        assert_eq!(vec![&1, &2, &3], first.iter().collect::<Vec<_>>());
    }

    #[test]
    fn appending_an_empty_listing_is_a_no_op() {
        let mut listing: Listing<u8> = Listing::new();
        listing.append(Listing::new());

        assert!(listing.is_empty());
        assert_eq!(0, listing.len());
    }
}
