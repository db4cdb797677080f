use std::net::IpAddr;

/// Rdata synthesized from cluster state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    Address(IpAddr),
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    Ns {
        target: String,
    },
    Soa {
        mname: String,
        rname: String,
        serial: u32,
        refresh: i32,
        retry: i32,
        expire: i32,
        minimum: u32,
    },
}

/// One resource record owned by a fully qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub owner: String,
    pub ttl: u32,
    pub data: RecordData,
}

impl ServiceRecord {
    pub fn new(owner: impl Into<String>, ttl: u32, data: RecordData) -> Self {
        Self {
            owner: owner.into(),
            ttl,
            data,
        }
    }

    pub fn address(&self) -> Option<IpAddr> {
        match self.data {
            RecordData::Address(ip) => Some(ip),
            _ => None,
        }
    }
}

/// Records answering one query. An empty `answers` list for an existing
/// name means NODATA.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupResult {
    pub answers: Vec<ServiceRecord>,
    pub additionals: Vec<ServiceRecord>,
}

impl LookupResult {
    pub fn new(answers: Vec<ServiceRecord>) -> Self {
        Self {
            answers,
            additionals: Vec::new(),
        }
    }

    pub fn with_additionals(mut self, additionals: Vec<ServiceRecord>) -> Self {
        self.additionals = additionals;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
