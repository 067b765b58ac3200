/// Project identifiers are opaque strings (UUIDv7 when server-assigned).
pub type ProjectId = String;

/// Money amounts are whole major currency units (rupees, not paise).
pub type Amount = i64;
