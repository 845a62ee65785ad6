//! Human-readable formatting of accumulated play time.

/// Calendar units used when formatting play time, largest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TimeUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    /// Length of one unit in seconds.
    pub const fn seconds(self) -> u64 {
        match self {
            Self::Year => 31_557_600,
            Self::Month => 2_592_000,
            Self::Week => 605_800,
            Self::Day => 86_400,
            Self::Hour => 3_600,
            Self::Minute => 60,
            Self::Second => 1,
        }
    }
}

/// Greedy decomposition of `seconds`, e.g. `"1 hour, 1 minute, 1 second, "`.
///
/// Zero components are omitted, so `0` formats as the empty string. Each
/// component keeps its trailing separator.
pub fn format_time_played(seconds: u64) -> String {
    use strum::IntoEnumIterator;

    let mut remaining = seconds;
    let mut out = String::new();
    for unit in TimeUnit::iter() {
        let count = remaining / unit.seconds();
        remaining %= unit.seconds();
        if count == 0 {
            continue;
        }
        let plural = if count == 1 { "" } else { "s" };
        out.push_str(&format!("{count} {unit}{plural}, "));
    }
    out
}
