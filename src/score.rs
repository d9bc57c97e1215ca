use std::cmp::Ordering;
use std::fmt;

/// Game-theoretic value of a probed position.
///
/// `Dtc(n)` is a distance-to-conversion in moves, signed from the viewpoint
/// of the side to move: positive means the mover wins in `n`, negative means
/// the mover loses in `-n`. The remaining variants are tags: `Won`/`Lost`
/// carry no distance, `NotWon`/`NotLost` are the partial knowledge produced
/// when only one side's table could be consulted, and `Unresolved` is the
/// raw "this side does not win / does not lose" sentinel before the flipped
/// probe resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Dtc(i32),
    Won,
    Lost,
    Draw,
    NotWon,
    NotLost,
    Unresolved,
    HighDtzMissing,
    Unknown,
}

impl Score {
    /// Sort key implementing the total order
    /// `WON > +N > NOT_LOST > DRAW > NOT_WON > -N > LOST`, with shorter wins
    /// ranked above longer ones (and longer losses above shorter ones), and
    /// `UNKNOWN` sorting last. `HighDtzMissing` slots in just below every
    /// exactly-known win: it is a win, but farther off than anything the main
    /// table can express.
    fn key(self) -> (u8, i64) {
        match self {
            Score::Won => (10, 0),
            Score::Dtc(n) if n >= 0 => (9, -(n as i64)),
            Score::HighDtzMissing => (8, 0),
            Score::NotLost => (7, 0),
            Score::Draw => (6, 0),
            Score::Unresolved => (5, 0),
            Score::NotWon => (4, 0),
            Score::Dtc(n) => (3, -(n as i64)),
            Score::Lost => (2, 0),
            Score::Unknown => (1, 0),
        }
    }

    /// True for outcomes that carry complete information (a distance or a
    /// definite tag), false for the partial and error-like ones.
    pub fn is_definite(self) -> bool {
        !matches!(
            self,
            Score::Unknown | Score::Unresolved | Score::NotWon | Score::NotLost
        )
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Dtc(n) if *n > 0 => write!(f, "+{n}"),
            Score::Dtc(n) => write!(f, "{n}"),
            Score::Won => write!(f, "won"),
            Score::Lost => write!(f, "lost"),
            Score::Draw => write!(f, "draw"),
            Score::NotWon => write!(f, "not-won"),
            Score::NotLost => write!(f, "not-lost"),
            Score::Unresolved => write!(f, "unresolved"),
            Score::HighDtzMissing => write!(f, "high-dtz-missing"),
            Score::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_contract() {
        let descending = [
            Score::Won,
            Score::Dtc(1),
            Score::Dtc(253),
            Score::HighDtzMissing,
            Score::NotLost,
            Score::Draw,
            Score::NotWon,
            Score::Dtc(-100),
            Score::Dtc(-1),
            Score::Lost,
            Score::Unknown,
        ];
        for w in descending.windows(2) {
            assert!(w[0] > w[1], "{:?} should rank above {:?}", w[0], w[1]);
        }
    }
}
