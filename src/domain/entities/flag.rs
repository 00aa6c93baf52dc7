use std::fmt;
use std::str::FromStr;

use crate::application::errors::UnknownFlagError;

/// Permission flag attached to a username
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Admin,
    Whitelist,
    Ignore,
}

impl Flag {
    /// Lookup table in the order codes are reported to operators
    pub const ALL: [Flag; 3] = [Flag::Admin, Flag::Whitelist, Flag::Ignore];

    pub fn code(self) -> char {
        match self {
            Flag::Admin => 'a',
            Flag::Whitelist => 'w',
            Flag::Ignore => 'i',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Flag::Admin => "admin",
            Flag::Whitelist => "whitelist",
            Flag::Ignore => "ignore",
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }

    /// Comma separated list of every valid code
    pub fn valid_codes() -> String {
        Self::ALL
            .iter()
            .map(|f| f.code().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Flag {
    type Err = UnknownFlagError;

    /// Accepts either the flag name or its one-character code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(flag) = Self::ALL.into_iter().find(|f| f.name() == s) {
            return Ok(flag);
        }
        let mut chars = s.chars();
        let by_code = match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_code(c),
            _ => None,
        };
        by_code.ok_or_else(|| UnknownFlagError::new(s))
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Stored flag codes for one user.
///
/// This is a string of codes, not a set: merging concatenates and sorts, so
/// granting a flag twice stores its code twice. Membership checks are
/// unaffected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet(String);

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps codes exactly as persisted
    pub fn from_codes(codes: impl Into<String>) -> Self {
        Self(codes.into())
    }

    /// Sorted concatenation of the current codes and `flag`
    pub fn merge(&self, flag: Flag) -> Self {
        let mut codes: Vec<char> = self.0.chars().collect();
        codes.push(flag.code());
        codes.sort_unstable();
        Self(codes.into_iter().collect())
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.contains(flag.code())
    }

    pub fn codes(&self) -> Vec<char> {
        self.0.chars().collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
