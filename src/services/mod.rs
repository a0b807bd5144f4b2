pub mod history_service;
pub mod recurrence_service;
pub mod smart_match_service;
pub mod validity_service;
