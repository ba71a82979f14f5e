//! Background services for the admin panel.

pub mod badges;

pub use badges::{BadgeCounters, spawn_badge_poller};
