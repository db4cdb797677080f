//! Mapping between `clusterset_dns_domain::RecordType` and
//! `hickory_proto::rr::RecordType`.

use clusterset_dns_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::TXT => HickoryRecordType::TXT,
            RecordType::PTR => HickoryRecordType::PTR,
            RecordType::SRV => HickoryRecordType::SRV,
            RecordType::SOA => HickoryRecordType::SOA,
            RecordType::NS => HickoryRecordType::NS,
            RecordType::AXFR => HickoryRecordType::AXFR,
            RecordType::IXFR => HickoryRecordType::IXFR,
            RecordType::ANY => HickoryRecordType::ANY,
            RecordType::Other(code) => HickoryRecordType::from(code),
        }
    }

    /// Total: types without a dedicated variant map to `RecordType::Other`.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        match hickory_type {
            HickoryRecordType::A => RecordType::A,
            HickoryRecordType::AAAA => RecordType::AAAA,
            HickoryRecordType::CNAME => RecordType::CNAME,
            HickoryRecordType::MX => RecordType::MX,
            HickoryRecordType::TXT => RecordType::TXT,
            HickoryRecordType::PTR => RecordType::PTR,
            HickoryRecordType::SRV => RecordType::SRV,
            HickoryRecordType::SOA => RecordType::SOA,
            HickoryRecordType::NS => RecordType::NS,
            HickoryRecordType::AXFR => RecordType::AXFR,
            HickoryRecordType::IXFR => RecordType::IXFR,
            HickoryRecordType::ANY => RecordType::ANY,
            other => RecordType::from_u16(u16::from(other)),
        }
    }
}
