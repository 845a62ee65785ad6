mod dump;
mod info;
mod list;
mod set;
mod slot;

pub use dump::Dump;
pub use info::Info;
pub use list::List;
pub use set::Set;
pub use slot::{Delete, New, Rename};
