use crate::application::errors::{BotError, StorageError};
use crate::domain::entities::{trigger, Flag, FlagSet, TriggerRule};

/// Per-user permission flags
pub trait FlagStore: Send + Sync {
    /// Merge `flag` into the user's stored codes, creating the row if needed
    fn add_flag(&self, username: &str, flag: Flag) -> Result<FlagSet, StorageError>;

    /// Stored codes for `username`, empty if the user has none
    fn get_flags(&self, username: &str) -> Result<FlagSet, StorageError>;

    /// Like `add_flag`, but accepts a flag name or code.
    ///
    /// Unknown flags fail before the store is touched.
    fn add_flag_named(&self, username: &str, flag: &str) -> Result<FlagSet, BotError> {
        let flag: Flag = flag.parse()?;
        Ok(self.add_flag(username, flag)?)
    }

    fn has_flag(&self, username: &str, flag: Flag) -> Result<bool, StorageError> {
        Ok(self.get_flags(username)?.contains(flag))
    }
}

/// Learned trigger rules, kept in insertion order
pub trait TriggerStore: Send + Sync {
    /// Insert unless an identical (pattern, response) row exists.
    /// Returns whether a row was added.
    fn learn(&self, pattern: &str, response: &str) -> Result<bool, StorageError>;

    /// Delete every row whose pattern equals `pattern` exactly
    fn forget(&self, pattern: &str) -> Result<usize, StorageError>;

    /// First stored response for the exact pattern
    fn response_for(&self, pattern: &str) -> Result<Option<String>, StorageError>;

    /// Every rule in storage order
    fn list_all(&self) -> Result<Vec<TriggerRule>, StorageError>;

    /// Delete every rule
    fn purge(&self) -> Result<usize, StorageError>;

    /// Response of the first rule whose pattern matches the start of `message`
    fn match_message(&self, message: &str, sender: &str) -> Result<Option<String>, StorageError> {
        let rules = self.list_all()?;
        Ok(trigger::first_match(&rules, message, sender))
    }
}

/// Backing store for both flags and triggers
pub trait Store: FlagStore + TriggerStore {
    /// Flush pending writes and release the connection
    fn close(&self) -> Result<(), StorageError>;
}
