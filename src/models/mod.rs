pub mod recurrence;
pub mod shift;
pub mod smart_match;
