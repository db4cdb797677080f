use std::fmt;
use std::str::FromStr;

/// Query types the multi-cluster handler distinguishes. Everything else is
/// carried as [`RecordType::Other`] and answered from name existence alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    TXT,
    PTR,
    SRV,
    SOA,
    NS,
    AXFR,
    IXFR,
    ANY,
    Other(u16),
}

const KNOWN: [(RecordType, u16, &str); 12] = [
    (RecordType::A, 1, "A"),
    (RecordType::NS, 2, "NS"),
    (RecordType::CNAME, 5, "CNAME"),
    (RecordType::SOA, 6, "SOA"),
    (RecordType::PTR, 12, "PTR"),
    (RecordType::MX, 15, "MX"),
    (RecordType::TXT, 16, "TXT"),
    (RecordType::AAAA, 28, "AAAA"),
    (RecordType::SRV, 33, "SRV"),
    (RecordType::IXFR, 251, "IXFR"),
    (RecordType::AXFR, 252, "AXFR"),
    (RecordType::ANY, 255, "ANY"),
];

impl RecordType {
    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::Other(code) => *code,
            known => KNOWN
                .iter()
                .find(|(t, _, _)| t == known)
                .map_or(0, |(_, code, _)| *code),
        }
    }

    /// Codes without a dedicated variant stay `Other`, so `from_u16` and
    /// `to_u16` round-trip every code.
    pub fn from_u16(code: u16) -> Self {
        KNOWN
            .iter()
            .find(|(_, c, _)| *c == code)
            .map_or(RecordType::Other(code), |(t, _, _)| *t)
    }

    pub fn is_address(&self) -> bool {
        matches!(self, RecordType::A | RecordType::AAAA)
    }

    pub fn is_zone_transfer(&self) -> bool {
        matches!(self, RecordType::AXFR | RecordType::IXFR)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match KNOWN.iter().find(|(t, _, _)| t == self) {
            Some((_, _, name)) => f.write_str(name),
            None => write!(f, "TYPE{}", self.to_u16()),
        }
    }
}

impl FromStr for RecordType {
    type Err = String;

    /// Accepts mnemonics in any case and the generic `TYPEnnn` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        if let Some((t, _, _)) = KNOWN.iter().find(|(_, _, name)| *name == upper) {
            return Ok(*t);
        }
        upper
            .strip_prefix("TYPE")
            .and_then(|code| code.parse::<u16>().ok())
            .map(RecordType::from_u16)
            .ok_or_else(|| format!("Unknown record type: {}", s))
    }
}
