use super::zones::Zones;

/// Zones for which a negative answer is handed to the next plugin instead
/// of being returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fallthrough {
    zones: Zones,
}

impl Fallthrough {
    /// An empty argument list falls through for every name.
    pub fn set_zones_from_args<S: AsRef<str>>(&mut self, args: &[S]) {
        self.zones = if args.is_empty() {
            Zones::from_args(&["."])
        } else {
            Zones::from_args(args)
        };
    }

    pub fn through(&self, qname: &str) -> bool {
        self.zones.matches(qname).is_some()
    }

    pub fn is_enabled(&self) -> bool {
        !self.zones.is_empty()
    }

    pub fn zones(&self) -> &Zones {
        &self.zones
    }
}
