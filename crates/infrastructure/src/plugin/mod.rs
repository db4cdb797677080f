//! The `multicluster` plugin: stanza parsing, setup and the startup binding
//! of the `kubernetes` plugin's nameserver lookup.
pub mod binding;
pub mod setup;
pub mod stanza;

pub use binding::{bind_nameserver_lookup, NAMESERVER_PROVIDER};
pub use setup::setup;
pub use stanza::parse_stanza;

pub const PLUGIN_NAME: &str = "multicluster";
