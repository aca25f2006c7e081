use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps passenger data so that log lines and serialized events only ever
/// show the first character followed by a fixed mask.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Masked<T>(pub T);

impl<T: fmt::Display> Masked<T> {
    fn masked(&self) -> String {
        let raw = self.0.to_string();
        match raw.chars().next() {
            Some(first) => format!("{}****", first),
            None => "****".to_string(),
        }
    }
}

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl<T: fmt::Display> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Same masked form as Display
        serializer.serialize_str(&self.masked())
    }
}
