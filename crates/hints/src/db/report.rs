//! Human-readable score dump.

use std::fmt;

use serde::Serialize;

use crate::relays::RelaySerial;

/// Every pubkey's relay list in its current order, pubkeys in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoresReport {
    pub pubkeys: Vec<PubkeyReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PubkeyReport {
    pub pubkey: String,
    pub relays: Vec<ScoreLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreLine {
    pub rank: usize,
    pub relay: String,
    pub serial: RelaySerial,
    pub score: i64,
}

impl fmt::Display for ScoresReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "= print scores")?;
        for pubkey in &self.pubkeys {
            write!(f, "{pubkey}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PubkeyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== relay scores for {}", self.pubkey)?;
        for line in &self.relays {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ScoreLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {:3} :: {:>30} ({:3}) ::> {:12}",
            self.rank, self.relay, self.serial.0, self.score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let report = ScoresReport {
            pubkeys: vec![PubkeyReport {
                pubkey: "alice".to_string(),
                relays: vec![ScoreLine {
                    rank: 0,
                    relay: "wss://relay.a".to_string(),
                    serial: RelaySerial(7),
                    score: 1234,
                }],
            }],
        };

        let text = report.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "= print scores");
        assert_eq!(lines[1], "== relay scores for alice");
        assert_eq!(
            lines[2],
            format!("    0 :: {:>30} (  7) ::>         1234", "wss://relay.a")
        );
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(ScoresReport::default().to_string(), "= print scores\n");
    }

    #[test]
    fn test_serialize() {
        let line = ScoreLine {
            rank: 1,
            relay: "wss://r".to_string(),
            serial: RelaySerial(2),
            score: 5,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["serial"], 2);
        assert_eq!(json["relay"], "wss://r");
    }
}
