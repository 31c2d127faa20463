//! Relay URL interning.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Stable handle for an interned relay URL: its position in the [`RelayTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelaySerial(pub u32);

impl fmt::Display for RelaySerial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Append-only table of relay URLs.
///
/// A URL keeps its serial for the table's lifetime. Identity is exact string equality: no case
/// folding, no trailing-slash or scheme normalization.
#[derive(Debug, Default)]
pub struct RelayTable {
    by_serial: Vec<Arc<str>>,
    by_url: HashMap<Arc<str>, RelaySerial>,
}

impl RelayTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serial for `url`, appending it if unseen. The bool is true when the URL was new.
    pub fn intern(&mut self, url: &str) -> (RelaySerial, bool) {
        if let Some(serial) = self.by_url.get(url) {
            return (*serial, false);
        }

        let serial = RelaySerial(self.by_serial.len() as u32);
        let url: Arc<str> = Arc::from(url);
        self.by_serial.push(Arc::clone(&url));
        self.by_url.insert(url, serial);
        (serial, true)
    }

    pub fn serial(&self, url: &str) -> Option<RelaySerial> {
        self.by_url.get(url).copied()
    }

    pub fn url(&self, serial: RelaySerial) -> Option<&str> {
        self.by_serial.get(serial.0 as usize).map(|url| &**url)
    }

    pub fn len(&self) -> usize {
        self.by_serial.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_serial.is_empty()
    }

    /// URLs in serial order.
    pub fn iter(&self) -> impl Iterator<Item = (RelaySerial, &str)> {
        self.by_serial
            .iter()
            .enumerate()
            .map(|(i, url)| (RelaySerial(i as u32), &**url))
    }
}
