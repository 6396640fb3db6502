//! Launcher adapters.

mod channel;

pub use channel::ChannelLauncher;
