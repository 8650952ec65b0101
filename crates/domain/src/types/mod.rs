//! Domain types

pub mod form;
pub mod notice;
pub mod profile;
pub mod session;

pub use form::{CachedForm, FormInput, PhotoFile};
pub use notice::{Notice, NoticeLevel};
pub use profile::{join_tags, parse_profile_date, split_tags, Gender, ProfileRow, RowRef};
pub use session::{AccountRef, Session, SessionUser};
