use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSource {
    File,
    Paste,
}

impl ItemSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemSource::File => "file",
            ItemSource::Paste => "paste",
        }
    }
}

impl fmt::Display for ItemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A queued piece of email-like text. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailItem {
    pub id: String,
    pub source: ItemSource,
    pub name: String,
    pub text: String,
}
