//! Relay hints: which relays to contact for a given pubkey.
//!
//! Callers [`save`](HintsDb::save) every sighting of a relay in connection with a pubkey (an event
//! fetched from it, an entry in the pubkey's relay list, a hint in a tag, a fetch attempt) and later
//! ask for the [`top_n`](HintsDb::top_n) relays. Each sighting only keeps its latest timestamp per
//! [`HintKey`]; ranking weighs those timestamps with a power-law decay so fresh, strong evidence
//! beats old or weak evidence.
//!
//! Hints are advisory. Nothing here touches the network or the disk, relay URLs are taken verbatim
//! and memory use grows with the number of distinct pubkeys and relays seen.
//!
//! # Usage
//!
//! ```
//! use relay_hints::{HintKey, HintsDb, MemoryHintDb};
//!
//! let db = MemoryHintDb::new();
//! db.save("alice", "wss://relay.a", HintKey::LastInRelayList, 1_700_000_000);
//! db.save("alice", "wss://relay.b", HintKey::MostRecentEventFetched, 1_700_000_000);
//!
//! assert_eq!(db.top_n("alice", 1), ["wss://relay.b"]);
//! assert!(db.top_n("bob", 3).is_empty());
//! ```

mod clock;
mod config;
mod db;
mod entry;
mod error;
mod key;
mod metrics;
mod relays;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::{BasePoints, HintDbConfig};
pub use db::{
    HintDbStats, HintsDb, MemoryHintDb, PubkeyReport, RelayScores, ScoreLine, ScoresReport,
};
pub use entry::RelayEntry;
pub use error::ConfigError;
pub use key::{HintKey, KEY_COUNT};
pub use relays::{RelaySerial, RelayTable};
