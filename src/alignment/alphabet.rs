use std::cmp::Reverse;
use std::collections::HashMap;

use crate::error::{AlignmentError, InputSide};

/// Number of codes available to the aligner: every code fits in 7 bits.
pub const ALPHABET_SIZE: usize = 128;

/// Fallback used when neither document contains a multi-unit character.
pub const DEFAULT_FALLBACK: char = '@';

/// Character to alphabet-code table shared by both documents of a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlphabetMapping {
    codes: HashMap<char, u8>,
}

impl AlphabetMapping {
    pub fn code(&self, c: char) -> Option<u8> {
        self.codes.get(&c).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Code that unmapped characters collapse onto.
    pub fn fallback_code(&self, fallback: char) -> u8 {
        match self.code(fallback) {
            Some(code) => code,
            None if fallback.is_ascii() => fallback as u8,
            None => DEFAULT_FALLBACK as u8,
        }
    }

    pub fn translate(&self, sequence: &str, fallback: char) -> Vec<u8> {
        let fallback_code = self.fallback_code(fallback);
        sequence
            .chars()
            .map(|c| self.code(c).unwrap_or(fallback_code))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingOutcome {
    pub mapping: AlphabetMapping,
    /// Distinct characters exceed what the alphabet can keep apart, so the
    /// least frequent wide characters were folded onto `fallback`.
    pub overflowed: bool,
    pub fallback: char,
}

#[derive(Debug, Clone, Copy)]
struct WideStats {
    count: usize,
    first_seen: usize,
}

pub fn build_mapping(sequences: [&str; 2]) -> Result<MappingOutcome, AlignmentError> {
    build_mapping_with_sentinel(sequences, DEFAULT_FALLBACK)
}

/// Build the alphabet for a document pair.
///
/// Single-unit characters keep their own code point. Multi-unit characters
/// take the remaining free codes in descending frequency order (ties go to the
/// character seen first, scanning the first document before the second); the
/// last one to get a code doubles as the fallback for the rest.
pub fn build_mapping_with_sentinel(
    sequences: [&str; 2],
    sentinel: char,
) -> Result<MappingOutcome, AlignmentError> {
    let [first, second] = sequences;
    if first.is_empty() {
        return Err(AlignmentError::empty(InputSide::First));
    }
    if second.is_empty() {
        return Err(AlignmentError::empty(InputSide::Second));
    }

    let mut codes: HashMap<char, u8> = HashMap::new();
    let mut used = [false; ALPHABET_SIZE];
    let mut wide: HashMap<char, WideStats> = HashMap::new();

    for c in first.chars().chain(second.chars()) {
        if c.len_utf8() == 1 {
            let code = c as u8;
            codes.insert(c, code);
            used[code as usize] = true;
        } else {
            let next_rank = wide.len();
            wide.entry(c)
                .or_insert(WideStats {
                    count: 0,
                    first_seen: next_rank,
                })
                .count += 1;
        }
    }

    let narrow_count = codes.len();
    let overflowed = narrow_count + wide.len() > ALPHABET_SIZE - 1;

    let mut ranked: Vec<(char, WideStats)> = wide.into_iter().collect();
    ranked.sort_by_key(|(_, stats)| (Reverse(stats.count), stats.first_seen));

    let mut fallback = sentinel;
    let mut free_codes = (0..ALPHABET_SIZE).filter(|&code| !used[code]);
    for (c, _) in &ranked {
        let Some(code) = free_codes.next() else {
            break;
        };
        codes.insert(*c, code as u8);
        fallback = *c;
    }

    if overflowed {
        let folded = ranked.len().saturating_sub(codes.len() - narrow_count);
        tracing::debug!(
            narrow_count,
            wide_count = ranked.len(),
            folded,
            fallback = %fallback,
            "alphabet overflow; least frequent wide characters share the fallback code"
        );
    }

    Ok(MappingOutcome {
        mapping: AlphabetMapping { codes },
        overflowed,
        fallback,
    })
}

/// Translate `sequence` into alphabet codes, one code per character.
pub fn remap(mapping: &AlphabetMapping, fallback: char, sequence: &str) -> Vec<u8> {
    mapping.translate(sequence, fallback)
}
