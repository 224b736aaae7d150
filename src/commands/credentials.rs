use crate::Result;
use camino::Utf8Path;
use core::fmt;
use ohno::app_err;
use serde::Deserialize;
use std::fs;

/// Database credentials read from a JSON file such as
/// `{"username": "vspheredb", "password": "vspheredb"}`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read and parse a credentials file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or lacks either field
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| app_err!("could not read credentials file '{path}': {e}"))?;
        serde_json::from_str(&text).map_err(|e| app_err!("invalid credentials file '{path}': {e}"))
    }
}
