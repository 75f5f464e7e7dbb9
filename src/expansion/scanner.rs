/// Quote tracking for the placeholder scanner.
///
/// A quote character closes the region only when it matches the innermost open quote; any
/// other quote character opens a nested region. This pairs doubled-quote escapes (`''`)
/// correctly, but a lone `"` inside a `'...'` literal is never closed and leaves the rest of
/// the statement treated as quoted.
#[derive(Debug, Default)]
pub(super) struct QuoteStack {
    open: Vec<u8>,
}

impl QuoteStack {
    pub(super) fn observe(&mut self, b: u8) {
        if !is_quote(b) {
            return;
        }
        if self.open.last() == Some(&b) {
            self.open.pop();
        } else {
            self.open.push(b);
        }
    }

    pub(super) fn is_unquoted(&self) -> bool {
        self.open.is_empty()
    }
}

pub(super) fn is_quote(b: u8) -> bool {
    b == b'\'' || b == b'"'
}

/// Byte offsets of every `?` outside quoted regions, in order.
pub(super) fn placeholder_positions(bytes: &[u8]) -> impl Iterator<Item = usize> + '_ {
    let mut quotes = QuoteStack::default();
    bytes.iter().enumerate().filter_map(move |(idx, &b)| {
        if b == b'?' {
            quotes.is_unquoted().then_some(idx)
        } else {
            quotes.observe(b);
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_quote_closes_region() {
        let mut stack = QuoteStack::default();
        stack.observe(b'\'');
        assert!(!stack.is_unquoted());
        stack.observe(b'\'');
        assert!(stack.is_unquoted());
    }

    #[test]
    fn opposite_quote_nests() {
        let mut stack = QuoteStack::default();
        for b in "'a\"b\"c'".bytes() {
            stack.observe(b);
        }
        assert!(stack.is_unquoted());
    }

    #[test]
    fn non_quote_bytes_are_ignored() {
        let mut stack = QuoteStack::default();
        for b in "select x from t".bytes() {
            stack.observe(b);
        }
        assert!(stack.is_unquoted());
    }
}
