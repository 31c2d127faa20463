//! Evidence categories linking a relay to a pubkey.

use serde::{Deserialize, Serialize};

/// Number of [`HintKey`] variants, i.e. timestamp slots per relay entry.
pub const KEY_COUNT: usize = <HintKey as strum::EnumCount>::COUNT;

/// Reason a relay is associated with a pubkey.
///
/// Each key owns one timestamp slot in a [`RelayEntry`](crate::RelayEntry), so the discriminants
/// double as slot indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(strum::IntoStaticStr)] // Into<&'static str>
#[derive(strum::Display)] // fmt::Display
#[derive(strum::EnumString)] // FromStr, TryFrom<&str>
#[derive(strum::EnumIter)] // HintKey::iter
#[derive(strum::EnumCount)] // HintKey::COUNT
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum HintKey {
    /// We tried to fetch this pubkey's data from the relay.
    LastFetchAttempt = 0,
    /// An event authored by this pubkey was fetched from the relay.
    MostRecentEventFetched = 1,
    /// The relay appears in the pubkey's own relay list.
    LastInRelayList = 2,
    /// The relay was suggested by a hint somewhere else (tags, nprofile, nevent).
    LastInHint = 3,
}

impl HintKey {
    /// Every key, in slot order.
    pub const ALL: [HintKey; KEY_COUNT] = [
        Self::LastFetchAttempt,
        Self::MostRecentEventFetched,
        Self::LastInRelayList,
        Self::LastInHint,
    ];

    /// Position of this key's timestamp slot.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Default base weight of this kind of evidence.
    ///
    /// A fetched event is the strongest signal, a relay list declared by the user comes next. Fetch
    /// attempts say little about whether the relay actually holds anything, and loose hints even less.
    pub const fn base_points(self) -> i64 {
        match self {
            Self::LastFetchAttempt => 50,
            Self::MostRecentEventFetched => 700,
            Self::LastInRelayList => 350,
            Self::LastInHint => 20,
        }
    }
}
