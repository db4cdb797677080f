mod nameserver_binding;

pub use nameserver_binding::NameserverBinding;
