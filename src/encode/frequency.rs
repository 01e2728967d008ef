// src/encode/frequency.rs

//! Symbol frequency counting.
//!
//! A [`FrequencyTable`] is the only piece of state shared between the
//! compressor and the decompressor: the header stores it, and both sides
//! rebuild the same encoding tree from it.

use crate::encode::symbol::Symbol;
use crate::utils::error::Result;
use crate::utils::log::debug;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::io::{ErrorKind, Read};

const SCAN_CHUNK: usize = 8 * 1024;

/// Mapping from [`Symbol`] to its number of occurrences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, u64>,
}

impl FrequencyTable {
    /// Creates an empty table. Tables built this way carry no end-of-stream
    /// entry until one is inserted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `reader` to exhaustion and counts every byte.
    ///
    /// The end-of-stream sentinel is always present in the result with a
    /// count of 1, so an empty source yields a one-entry table. The reader is
    /// left at its end.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut histogram = [0u64; 256];
        let mut chunk = [0u8; SCAN_CHUNK];
        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &b in &chunk[..n] {
                histogram[b as usize] += 1;
            }
        }
        Ok(Self::from_histogram(&histogram))
    }

    /// Counts an in-memory buffer. Same result as [`FrequencyTable::from_reader`].
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_histogram(&histogram(data))
    }

    fn from_histogram(histogram: &[u64; 256]) -> Self {
        let mut counts: BTreeMap<Symbol, u64> = histogram
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(b, &count)| (Symbol::Byte(b as u8), count))
            .collect();
        counts.insert(Symbol::EndOfStream, 1);

        let table = Self { counts };
        debug!(
            "frequency table: {} distinct bytes, {} input bytes",
            table.distinct_bytes(),
            table.total_weight() - 1
        );
        table
    }

    pub fn get(&self, symbol: Symbol) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Sets the count for `symbol`, returning the previous count.
    pub fn insert(&mut self, symbol: Symbol, count: u64) -> Option<u64> {
        self.counts.insert(symbol, count)
    }

    pub fn remove(&mut self, symbol: Symbol) -> Option<u64> {
        self.counts.remove(&symbol)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.counts.contains_key(&symbol)
    }

    pub fn has_end_of_stream(&self) -> bool {
        self.contains(Symbol::EndOfStream)
    }

    /// Number of entries, the sentinel included.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of byte symbols, i.e. entries excluding the sentinel.
    pub fn distinct_bytes(&self) -> usize {
        self.counts.len() - usize::from(self.has_end_of_stream())
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total_weight(&self) -> u64 {
        self.counts.values().fold(0, |total, &count| total.saturating_add(count))
    }

    /// Iterates entries in ascending symbol order, the sentinel last.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.counts.iter(),
        }
    }
}

impl FromIterator<(Symbol, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (Symbol, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = (Symbol, u64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(symbol, count)` pairs of a [`FrequencyTable`].
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, Symbol, u64>,
}

impl Iterator for Iter<'_> {
    type Item = (Symbol, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&s, &c)| (s, c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(not(feature = "rayon"))]
fn histogram(data: &[u8]) -> [u64; 256] {
    let mut counts = [0u64; 256];
    for &b in data {
        counts[b as usize] += 1;
    }
    counts
}

#[cfg(feature = "rayon")]
fn histogram(data: &[u8]) -> [u64; 256] {
    use rayon::prelude::*;

    data.par_chunks(64 * 1024)
        .map(|chunk| {
            let mut counts = [0u64; 256];
            for &b in chunk {
                counts[b as usize] += 1;
            }
            counts
        })
        .reduce(
            || [0u64; 256],
            |mut acc, part| {
                for (a, p) in acc.iter_mut().zip(part.iter()) {
                    *a += p;
                }
                acc
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_counts_bytes_and_adds_sentinel() {
        let table = FrequencyTable::from_bytes(b"aaab");
        assert_eq!(table.get(Symbol::Byte(b'a')), Some(3));
        assert_eq!(table.get(Symbol::Byte(b'b')), Some(1));
        assert_eq!(table.get(Symbol::EndOfStream), Some(1));
        assert_eq!(table.len(), 3);
        assert_eq!(table.distinct_bytes(), 2);
        assert_eq!(table.total_weight(), 5);
    }

    #[test]
    fn test_empty_input_has_only_sentinel() -> Result<()> {
        let table = FrequencyTable::from_reader(Cursor::new(Vec::<u8>::new()))?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(Symbol::EndOfStream), Some(1));
        assert!(!table.is_empty());
        Ok(())
    }

    #[test]
    fn test_high_bytes_are_unsigned() {
        let table = FrequencyTable::from_bytes(&[0xff, 0x80, 0xff, 0x00]);
        assert_eq!(table.get(Symbol::Byte(0xff)), Some(2));
        assert_eq!(table.get(Symbol::Byte(0x80)), Some(1));
        assert_eq!(table.get(Symbol::Byte(0x00)), Some(1));
    }

    #[test]
    fn test_reader_consumes_source() -> Result<()> {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 7) as u8).collect();
        let mut cursor = Cursor::new(data.clone());
        let table = FrequencyTable::from_reader(&mut cursor)?;
        assert_eq!(cursor.position(), data.len() as u64);
        assert_eq!(table, FrequencyTable::from_bytes(&data));
        Ok(())
    }

    #[test]
    fn test_iteration_order() {
        let table = FrequencyTable::from_bytes(b"zyx");
        let symbols: Vec<Symbol> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(
            symbols,
            vec![
                Symbol::Byte(b'x'),
                Symbol::Byte(b'y'),
                Symbol::Byte(b'z'),
                Symbol::EndOfStream
            ]
        );
    }

    #[test]
    fn test_manual_table_without_sentinel() {
        let mut table = FrequencyTable::new();
        table.insert(Symbol::Byte(1), 4);
        assert!(!table.has_end_of_stream());
        assert_eq!(table.distinct_bytes(), 1);
        assert_eq!(table.remove(Symbol::Byte(1)), Some(4));
        assert!(table.is_empty());
    }

    /// Spans several 64 KiB chunks with a ragged tail so the parallel
    /// histogram has to merge partial counts.
    fn multi_chunk_data() -> Vec<u8> {
        (0..300_001u32)
            .map(|i| (i.wrapping_mul(2654435761) >> 13) as u8)
            .collect()
    }

    #[test]
    fn test_histogram_matches_reader() -> Result<()> {
        let data = multi_chunk_data();
        let from_buffer = FrequencyTable::from_bytes(&data);
        let from_reader = FrequencyTable::from_reader(Cursor::new(data.as_slice()))?;
        assert_eq!(from_buffer, from_reader);
        assert_eq!(from_buffer.total_weight(), data.len() as u64 + 1);
        Ok(())
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_histogram_matches_sequential_count() {
        let data = multi_chunk_data();
        let mut expected = [0u64; 256];
        for &b in &data {
            expected[b as usize] += 1;
        }
        assert_eq!(histogram(&data), expected);
        assert_eq!(histogram(&[]), [0u64; 256]);
    }
}
