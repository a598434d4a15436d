use std::collections::HashMap;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str;

use log::warn;
use xxhash_rust::xxh3::Xxh3Builder;

pub const HEADER: &str = "Vector - Character(ascii)  Frequency";

const INDENT: &str = "        ";
const DELETE: u32 = 127;

// equality compares the character only, never the count
#[derive(Debug, Clone)]
pub struct FrequencyEntry {
    character: char,
    count: usize,
}

impl FrequencyEntry {
    fn new(character: char) -> Self {
        FrequencyEntry {
            character,
            count: 0,
        }
    }

    pub fn character(&self) -> char {
        self.character
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn code(&self) -> u32 {
        u32::from(self.character)
    }

    pub fn increment(&mut self) {
        self.count += 1;
    }

    pub fn is_control(&self) -> bool {
        let code = self.code();
        code < 32 || code == DELETE
    }
}

impl PartialEq for FrequencyEntry {
    fn eq(&self, other: &Self) -> bool {
        self.character == other.character
    }
}

impl Eq for FrequencyEntry {}

// control codes have no printable glyph, only the numeric code is shown
impl fmt::Display for FrequencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_control() {
            write!(f, "{}({})\t{}", INDENT, self.code(), self.count)
        } else {
            write!(
                f,
                "{}{}({})\t{}",
                INDENT,
                self.character,
                self.code(),
                self.count
            )
        }
    }
}

/// Character counts kept in first-occurrence order.
///
/// Entries live in a `Vec` so iteration follows the order characters were
/// first seen; `index` maps a character to its slot so lookups don't have to
/// walk the whole table.
#[derive(Debug)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
    index: HashMap<char, usize, Xxh3Builder>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            entries: Vec::with_capacity(128),
            index: HashMap::with_capacity_and_hasher(128, Xxh3Builder::new()),
        }
    }

    /// Returns the entry for `character`, appending a zero-count entry when
    /// the character has not been seen before.
    pub fn find_or_create(&mut self, character: char) -> &mut FrequencyEntry {
        let next = self.entries.len();
        let slot = *self.index.entry(character).or_insert(next);
        if slot == next {
            self.entries.push(FrequencyEntry::new(character));
        }
        &mut self.entries[slot]
    }

    pub fn record(&mut self, character: char) {
        self.find_or_create(character).increment();
    }

    pub fn get(&self, character: char) -> Option<&FrequencyEntry> {
        self.index.get(&character).map(|&slot| &self.entries[slot])
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(FrequencyEntry::count).sum()
    }

    /// Reads `reader` to the end and records every character in it.
    ///
    /// Bytes are decoded as UTF-8 a buffer at a time. Each invalid or
    /// truncated sequence is counted once as U+FFFD, so a Latin-1 file still
    /// gets a report.
    pub fn scan<R: BufRead>(&mut self, mut reader: R) -> io::Result<usize> {
        let mut bytes = Vec::new();
        let mut progress = Progress::default();
        loop {
            let chunk = match reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if chunk.is_empty() {
                break;
            }
            let len = chunk.len();
            bytes.extend_from_slice(chunk);
            reader.consume(len);

            let tail = self.decode(&bytes, &mut progress);
            bytes.drain(..bytes.len() - tail);
        }
        if !bytes.is_empty() {
            self.record(char::REPLACEMENT_CHARACTER);
            progress.read += 1;
            progress.replaced += 1;
        }
        if progress.replaced > 0 {
            warn!(
                "{} invalid UTF-8 sequences counted as U+FFFD",
                progress.replaced
            );
        }
        Ok(progress.read)
    }

    // returns the length of an incomplete sequence left at the end of `bytes`
    fn decode(&mut self, mut bytes: &[u8], progress: &mut Progress) -> usize {
        loop {
            let (valid, rest) = match str::from_utf8(bytes) {
                Ok(text) => (text, None),
                Err(err) => {
                    let (head, rest) = bytes.split_at(err.valid_up_to());
                    let head = str::from_utf8(head).unwrap_or_default();
                    (head, Some((rest, err.error_len())))
                }
            };
            for character in valid.chars() {
                self.record(character);
                progress.read += 1;
            }
            match rest {
                None => return 0,
                Some((rest, None)) => return rest.len(),
                Some((rest, Some(invalid))) => {
                    self.record(char::REPLACEMENT_CHARACTER);
                    progress.read += 1;
                    progress.replaced += 1;
                    bytes = &rest[invalid..];
                }
            }
        }
    }

    pub fn write(&self, output: &mut dyn Write, console: &mut dyn Write) -> io::Result<()> {
        writeln!(output, "{}\n", HEADER)?;
        writeln!(console, "{}\n", HEADER)?;
        for entry in &self.entries {
            let line = entry.to_string();
            writeln!(output, "{}", line)?;
            writeln!(console, "{}", line)?;
        }
        output.flush()?;
        Ok(())
    }
}

#[derive(Default)]
struct Progress {
    read: usize,
    replaced: usize,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<char> for FrequencyTable {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for character in iter {
            self.record(character);
        }
    }
}

impl FromIterator<char> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        table.extend(iter);
        table
    }
}
