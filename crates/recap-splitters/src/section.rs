use std::sync::Arc;

use recap_core::TokenCounter;

use crate::TextSplitter;

/// Splits text into contiguous sections that each fit a token budget.
///
/// The text is first divided at occurrences of the boundary string, with
/// the boundary kept attached to the preceding piece, so concatenating
/// the returned sections reproduces the input byte-for-byte. Pieces are
/// then merged greedily while the merged section stays within
/// `max_input_tokens` as measured by the counter.
///
/// A piece with no boundary that exceeds the budget on its own is
/// hard-cut at the largest character-boundary prefix that still fits,
/// so the splitter always makes forward progress.
pub struct SectionSplitter {
    boundary: String,
    max_input_tokens: usize,
    counter: Arc<dyn TokenCounter>,
}

impl SectionSplitter {
    pub fn new(max_input_tokens: usize, counter: Arc<dyn TokenCounter>) -> Self {
        Self {
            boundary: ".".to_string(),
            max_input_tokens,
            counter,
        }
    }

    pub fn with_boundary(mut self, boundary: impl Into<String>) -> Self {
        self.boundary = boundary.into();
        self
    }
}

impl TextSplitter for SectionSplitter {
    fn split_text(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut pieces: Vec<String> = Vec::new();
        for piece in text.split_inclusive(self.boundary.as_str()) {
            if self.counter.count_text(piece) > self.max_input_tokens {
                pieces.extend(hard_cut(piece, self.max_input_tokens, self.counter.as_ref()));
            } else {
                pieces.push(piece.to_string());
            }
        }

        // Greedily pack pieces into sections under the budget. The
        // candidate is recounted as a whole because token counts are not
        // exactly additive across a concatenation.
        let mut sections = Vec::new();
        let mut current = String::new();
        for piece in pieces {
            if current.is_empty() {
                current = piece;
                continue;
            }
            let mut candidate = current.clone();
            candidate.push_str(&piece);
            if self.counter.count_text(&candidate) > self.max_input_tokens {
                sections.push(std::mem::replace(&mut current, piece));
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            sections.push(current);
        }

        sections
    }
}

/// Cut a boundary-free piece into successive maximal prefixes that fit
/// the budget.
fn hard_cut(piece: &str, max_tokens: usize, counter: &dyn TokenCounter) -> Vec<String> {
    let mut cuts = Vec::new();
    let mut rest = piece;
    while counter.count_text(rest) > max_tokens {
        let at = largest_fitting_prefix(rest, max_tokens, counter);
        let (head, tail) = rest.split_at(at);
        cuts.push(head.to_string());
        rest = tail;
    }
    if !rest.is_empty() {
        cuts.push(rest.to_string());
    }
    cuts
}

/// Byte offset of the largest char-boundary prefix within the budget.
/// Returns at least one character even if that single character exceeds
/// the budget, so callers always consume input.
fn largest_fitting_prefix(text: &str, max_tokens: usize, counter: &dyn TokenCounter) -> usize {
    let ends: Vec<usize> = text
        .char_indices()
        .skip(1)
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    if counter.count_text(&text[..ends[0]]) > max_tokens {
        return ends[0];
    }

    let mut lo = 0;
    let mut hi = ends.len() - 1;
    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        if counter.count_text(&text[..ends[mid]]) <= max_tokens {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    ends[lo]
}
