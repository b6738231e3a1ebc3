use std::fmt;
use std::str::FromStr;

use super::{Cursor, Error};

/// Longest label a single length byte can describe
pub const MAX_LABEL_LEN: usize = 255;

/// A domain name as a sequence of labels
///
/// Labels are raw bytes, `1..=255` long. Every constructor checks these
/// bounds, so any `Name` can be written back to the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    labels: Vec<Vec<u8>>,
}

impl Name {
    /// Reads a length-prefixed, zero-terminated label sequence
    ///
    /// Compression pointers are not recognized, a length byte is always taken
    /// literally.
    pub fn scan(cursor: &mut Cursor) -> Result<Name, Error> {
        if cursor.peek() == Some(0) {
            return Err(Error::EmptyName);
        }
        let mut labels = Vec::new();
        loop {
            let len = cursor.advance().ok_or(Error::UnexpectedEOF)?;
            if len == 0 {
                return Ok(Name { labels: labels });
            }
            let mut label = Vec::with_capacity(len as usize);
            for _ in 0..len {
                label.push(cursor.advance().ok_or(Error::UnexpectedEOF)?);
            }
            labels.push(label);
        }
    }

    pub fn from_labels<I, L>(labels: I) -> Result<Name, Error>
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let mut collected = Vec::new();
        for label in labels {
            let label = label.into();
            if label.is_empty() {
                return Err(Error::EmptyLabel);
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(Error::LabelTooLong(label.len()));
            }
            collected.push(label);
        }
        if collected.is_empty() {
            return Err(Error::EmptyName);
        }
        Ok(Name { labels: collected })
    }

    pub fn labels(&self) -> &[Vec<u8>] {
        &self.labels
    }

    /// Size of the name on the wire, terminator included
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        for label in &self.labels {
            buf.push(label.len() as u8);
            buf.extend_from_slice(label);
        }
        buf.push(0);
    }

    /// Copy of the name with ASCII letters folded to lower case
    pub fn to_ascii_lowercase(&self) -> Name {
        Name {
            labels: self
                .labels
                .iter()
                .map(|label| label.to_ascii_lowercase())
                .collect(),
        }
    }
}

/// Parses dotted notation, a single trailing dot is allowed
impl FromStr for Name {
    type Err = Error;

    fn from_str(name: &str) -> Result<Name, Error> {
        let name = name.strip_suffix('.').unwrap_or(name);
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        Name::from_labels(name.split('.').map(|part| part.as_bytes()))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for (i, label) in self.labels.iter().enumerate() {
            if i != 0 {
                fmt.write_str(".")?;
            }
            fmt.write_str(&String::from_utf8_lossy(label))?;
        }
        Ok(())
    }
}
