//! Authentication adapters.
//!
//! Implementations of the `CurrentUserProvider` port:
//!
//! - `static_user` - User held in memory, set by the host application

mod static_user;

pub use static_user::StaticUserProvider;
