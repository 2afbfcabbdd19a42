mod decoration;
mod patch;
mod types;

pub use decoration::{decorate, filter_and_decorate, is_blank_query, matches_member_name};
pub use patch::EventPatch;
pub use types::{Band, Event, Member, Members};
