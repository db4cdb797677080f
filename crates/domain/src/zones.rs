use std::fmt;

/// Normalizes a zone or server block key into a lowercase FQDN.
///
/// Accepts the forms found in server block keys: an optional `dns://`
/// scheme and an optional `:port` suffix are stripped. Returns `None` for
/// inputs that cannot name a zone.
pub fn normalize_zone(input: &str) -> Option<String> {
    let mut host = input.trim();
    if let Some(rest) = host.strip_prefix("dns://") {
        host = rest;
    }

    if let Some((name, port)) = host.rsplit_once(':') {
        if !name.contains(':') && !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
            host = name;
        }
    }

    if host.is_empty() || host == "." {
        return Some(".".to_string());
    }
    if host.contains("..") || host.starts_with('.') || host.contains(char::is_whitespace) {
        return None;
    }

    let mut zone = host.to_ascii_lowercase();
    if !zone.ends_with('.') {
        zone.push('.');
    }
    Some(zone)
}

/// Lowercases a query name and makes it fully qualified.
pub fn fqdn(name: &str) -> String {
    let mut name = name.trim().to_ascii_lowercase();
    if !name.ends_with('.') {
        name.push('.');
    }
    name
}

/// True when `name` equals `zone` or lies below it.
pub fn is_subdomain(zone: &str, name: &str) -> bool {
    if zone == "." {
        return true;
    }
    name == zone
        || (name.len() > zone.len()
            && name.ends_with(zone)
            && name.as_bytes()[name.len() - zone.len() - 1] == b'.')
}

/// An ordered set of normalized zones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Zones(Vec<String>);

impl Zones {
    /// Builds a zone set, silently skipping entries that do not normalize
    /// and duplicates.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        let mut zones = Vec::with_capacity(args.len());
        for arg in args {
            if let Some(zone) = normalize_zone(arg.as_ref()) {
                if !zones.contains(&zone) {
                    zones.push(zone);
                }
            }
        }
        Self(zones)
    }

    /// Zones named on the plugin line, or the server block keys when the
    /// line names none.
    pub fn from_args_or_server_block<S: AsRef<str>, K: AsRef<str>>(
        args: &[S],
        server_block_keys: &[K],
    ) -> Self {
        if args.is_empty() {
            Self::from_args(server_block_keys)
        } else {
            Self::from_args(args)
        }
    }

    /// Returns the longest zone that contains `qname`.
    pub fn matches(&self, qname: &str) -> Option<&str> {
        let qname = fqdn(qname);
        self.0
            .iter()
            .filter(|zone| is_subdomain(zone, &qname))
            .max_by_key(|zone| zone.len())
            .map(String::as_str)
    }

    pub fn contains(&self, zone: &str) -> bool {
        normalize_zone(zone).is_some_and(|zone| self.0.contains(&zone))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for Zones {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_subdomain_requires_label_boundary() {
        assert!(is_subdomain("clusterset.local.", "a.clusterset.local."));
        assert!(!is_subdomain("clusterset.local.", "aclusterset.local."));
        assert!(is_subdomain(".", "anything.example."));
    }

    #[test]
    fn test_fqdn_lowercases_and_qualifies() {
        assert_eq!(fqdn("My.Svc.ClusterSet.Local"), "my.svc.clusterset.local.");
    }
}
