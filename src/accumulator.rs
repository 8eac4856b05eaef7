//! The growable output buffer behind a serialization.
//!
//! Output is accumulated as a rope: an ordered list of sealed segments plus
//! one mutable active segment. A segment is narrow (ASCII bytes) or wide
//! (UTF-16 code units). The buffer starts narrow and promotes to wide, once
//! and irreversibly, the first time a wide source string is appended. Sealing
//! truncates a segment's unused capacity and pushes it onto the list; the
//! final join is a single pass over the segments with a precomputed length.
//!
//! A linear buffer would be O(n²) under repeated reallocation-and-copy; the
//! segment list defers all concatenation cost to [`Accumulator::finalize`]
//! and bounds allocation at roughly twice the output size.

use std::mem;

use crate::string::{Encoding, JsString};

/// Capacity of the first active segment.
pub(crate) const INITIAL_PART_LEN: usize = 32;
/// Upper bound on segment capacity.
pub(crate) const MAX_PART_LEN: usize = 16 * 1024;
/// Segment capacity multiplier applied at each seal.
pub(crate) const PART_GROWTH_FACTOR: usize = 2;

#[derive(Debug)]
enum Segment {
    Narrow(Vec<u8>),
    Wide(Vec<u16>),
}

impl Segment {
    fn len(&self) -> usize {
        match self {
            Segment::Narrow(v) => v.len(),
            Segment::Wide(v) => v.len(),
        }
    }

    /// Releases the unused tail of a partially-filled segment.
    fn release_tail(&mut self) {
        match self {
            Segment::Narrow(v) => v.shrink_to_fit(),
            Segment::Wide(v) => v.shrink_to_fit(),
        }
    }
}

/// Mutable access to the active segment, for bulk writes that have already
/// verified capacity.
pub(crate) enum ActiveMut<'a> {
    Narrow(&'a mut Vec<u8>),
    Wide(&'a mut Vec<u16>),
}

#[derive(Debug)]
pub(crate) struct Accumulator {
    sealed: Vec<Segment>,
    active: Segment,
    part_length: usize,
}

impl Accumulator {
    pub(crate) fn new() -> Self {
        Accumulator {
            sealed: Vec::new(),
            active: Segment::Narrow(Vec::with_capacity(INITIAL_PART_LEN)),
            part_length: INITIAL_PART_LEN,
        }
    }

    pub(crate) fn encoding(&self) -> Encoding {
        match self.active {
            Segment::Narrow(_) => Encoding::Narrow,
            Segment::Wide(_) => Encoding::Wide,
        }
    }

    /// Records one code unit. Callers must promote before appending a
    /// non-ASCII unit; the buffer itself never transcodes.
    pub(crate) fn append_unit(&mut self, c: u16) {
        match &mut self.active {
            Segment::Narrow(v) => {
                debug_assert!(c < 0x80, "narrow segments hold ASCII only");
                v.push(c as u8);
            }
            Segment::Wide(v) => v.push(c),
        }
        if self.active.len() == self.part_length {
            self.seal_and_grow();
        }
    }

    pub(crate) fn append_byte(&mut self, b: u8) {
        self.append_unit(b as u16);
    }

    /// Appends an ASCII literal one code unit at a time.
    pub(crate) fn append_ascii(&mut self, literal: &[u8]) {
        for &b in literal {
            self.append_unit(b as u16);
        }
    }

    /// Seals the active narrow segment and starts a wide one of the same
    /// capacity. No-op when already wide.
    pub(crate) fn promote_to_wide(&mut self) {
        if matches!(self.active, Segment::Wide(_)) {
            return;
        }
        let mut done = mem::replace(
            &mut self.active,
            Segment::Wide(Vec::with_capacity(self.part_length)),
        );
        done.release_tail();
        self.sealed.push(done);
    }

    /// Whether `extra` more units fit in the active segment without sealing.
    pub(crate) fn has_room(&self, extra: usize) -> bool {
        self.active.len() + extra < self.part_length
    }

    pub(crate) fn active_mut(&mut self) -> ActiveMut<'_> {
        match &mut self.active {
            Segment::Narrow(v) => ActiveMut::Narrow(v),
            Segment::Wide(v) => ActiveMut::Wide(v),
        }
    }

    fn seal_and_grow(&mut self) {
        self.part_length = (self.part_length * PART_GROWTH_FACTOR).min(MAX_PART_LEN);
        let fresh = match self.active {
            Segment::Narrow(_) => Segment::Narrow(Vec::with_capacity(self.part_length)),
            Segment::Wide(_) => Segment::Wide(Vec::with_capacity(self.part_length)),
        };
        self.sealed.push(mem::replace(&mut self.active, fresh));
    }

    /// Joins every segment into one string in the buffer's final encoding.
    pub(crate) fn finalize(mut self) -> JsString {
        self.active.release_tail();
        let total = self.sealed.iter().map(Segment::len).sum::<usize>() + self.active.len();
        match self.active {
            Segment::Narrow(last) => {
                let mut out = Vec::with_capacity(total);
                for segment in &self.sealed {
                    match segment {
                        Segment::Narrow(v) => out.extend_from_slice(v),
                        // Promotion is one-way: a narrow active segment means
                        // no wide segment was ever sealed.
                        Segment::Wide(_) => unreachable!("wide segment in a narrow buffer"),
                    }
                }
                out.extend_from_slice(&last);
                JsString::from_narrow_bytes(out)
            }
            Segment::Wide(last) => {
                let mut out = Vec::with_capacity(total);
                for segment in &self.sealed {
                    match segment {
                        Segment::Narrow(v) => out.extend(v.iter().map(|&b| b as u16)),
                        Segment::Wide(v) => out.extend_from_slice(v),
                    }
                }
                out.extend_from_slice(&last);
                JsString::from_wide_units(out)
            }
        }
    }

    /// The logical content so far: `concat(sealed) || active`.
    #[cfg(test)]
    pub(crate) fn logical_content(&self) -> String {
        let mut out = String::new();
        for segment in self.sealed.iter().chain(std::iter::once(&self.active)) {
            match segment {
                Segment::Narrow(v) => out.extend(v.iter().map(|&b| b as char)),
                Segment::Wide(v) => out.push_str(&String::from_utf16_lossy(v)),
            }
        }
        out
    }

    #[cfg(test)]
    fn sealed_count(&self) -> usize {
        self.sealed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_finalize_narrow() {
        let mut acc = Accumulator::new();
        acc.append_ascii(b"true");
        let out = acc.finalize();
        assert_eq!(out.encoding(), Encoding::Narrow);
        assert_eq!(out, "true");
    }

    #[test]
    fn test_part_length_is_capped() {
        let mut acc = Accumulator::new();
        for _ in 0..(MAX_PART_LEN * 4) {
            acc.append_byte(b'x');
            assert!(acc.part_length <= MAX_PART_LEN);
        }
        assert_eq!(acc.part_length, MAX_PART_LEN);
        assert_eq!(acc.finalize().len(), MAX_PART_LEN * 4);
    }

    #[test]
    fn test_segment_capacities_follow_growth_rule() {
        let mut acc = Accumulator::new();
        for _ in 0..500 {
            acc.append_byte(b'x');
        }
        // 32 + 64 + 128 + 256 = 480 sealed, 20 in the active segment.
        let lens: Vec<usize> = acc.sealed.iter().map(Segment::len).collect();
        assert_eq!(lens, vec![32, 64, 128, 256]);
        assert_eq!(acc.active.len(), 20);
    }

    #[test]
    fn test_promotion_is_idempotent_and_one_way() {
        let mut acc = Accumulator::new();
        acc.append_ascii(b"ab");
        acc.promote_to_wide();
        assert_eq!(acc.encoding(), Encoding::Wide);
        acc.promote_to_wide();
        assert_eq!(acc.encoding(), Encoding::Wide);
        acc.append_unit(0x2028);
        let out = acc.finalize();
        assert_eq!(out.encoding(), Encoding::Wide);
        assert_eq!(out.to_std_string(), "ab\u{2028}");
    }

    #[test]
    fn test_promotion_with_empty_active_segment_seals_empty() {
        let mut acc = Accumulator::new();
        acc.promote_to_wide();
        acc.append_unit(0xe9);
        assert_eq!(acc.finalize().to_std_string(), "é");
    }

    #[test]
    fn test_logical_content_stable_across_seal_points() {
        let mut acc = Accumulator::new();
        let mut expected = String::new();
        let mut seen_seals = 0;
        for i in 0..200usize {
            let b = b'a' + (i % 26) as u8;
            acc.append_byte(b);
            expected.push(b as char);
            if acc.sealed_count() != seen_seals {
                seen_seals = acc.sealed_count();
                assert_eq!(acc.logical_content(), expected);
            }
        }
        assert_eq!(acc.finalize(), expected.as_str());
    }

    #[test]
    fn test_finalize_mixes_narrow_and_wide_segments() {
        let mut acc = Accumulator::new();
        for _ in 0..40 {
            acc.append_byte(b'a');
        }
        acc.promote_to_wide();
        for _ in 0..40 {
            acc.append_unit(0x3b1); // α
        }
        let out = acc.finalize();
        assert_eq!(out.encoding(), Encoding::Wide);
        let expected = format!("{}{}", "a".repeat(40), "α".repeat(40));
        assert_eq!(out.to_std_string(), expected);
    }
}
