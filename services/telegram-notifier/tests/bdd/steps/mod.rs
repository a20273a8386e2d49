//! BDD step definitions for the telegram notifier

pub mod caption_steps;
pub mod delivery_steps;
