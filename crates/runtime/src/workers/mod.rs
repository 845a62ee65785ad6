//! Background tasks that back the slot manager.
//!
//! The persistence worker owns container I/O, the notification dispatcher
//! fans lifecycle events out to listeners, and the playtime tracker counts
//! seconds for the active slot.

mod notify;
mod persistence;
mod playtime;

pub use notify::NotificationDispatcher;
pub use persistence::{PersistenceError, PersistenceHandle};
pub use playtime::PlaytimeTracker;
