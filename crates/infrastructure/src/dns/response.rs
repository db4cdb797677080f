//! Builds hickory reply messages from synthesized records.

use clusterset_dns_domain::{DomainError, LookupResult, RecordData, ServiceRecord};
use hickory_proto::op::{Edns, Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, NS, SOA, SRV};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::IpAddr;
use std::str::FromStr;

/// UDP payload size advertised in replies to EDNS queries.
pub const EDNS_PAYLOAD: u16 = 4096;

pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Empty reply echoing the request's id, opcode, RD flag and question.
    /// An OPT record in the request is answered with our own.
    pub fn reply(request: &Message, code: ResponseCode) -> Message {
        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
        response.set_recursion_desired(request.recursion_desired());
        response.set_response_code(code);
        response.add_queries(request.queries().iter().cloned());
        if let Some(edns) = request.extensions() {
            let mut echoed = Edns::new();
            echoed
                .set_max_payload(EDNS_PAYLOAD)
                .set_version(edns.version())
                .set_dnssec_ok(edns.flags().dnssec_ok);
            response.set_edns(echoed);
        }
        response
    }

    pub fn error(request: &Message, code: ResponseCode) -> Message {
        Self::reply(request, code)
    }

    /// Authoritative positive answer.
    pub fn answer(request: &Message, result: &LookupResult) -> Result<Message, DomainError> {
        let mut response = Self::reply(request, ResponseCode::NoError);
        response.set_authoritative(true);
        for record in &result.answers {
            response.add_answer(Self::to_record(record)?);
        }
        for record in &result.additionals {
            response.add_additional(Self::to_record(record)?);
        }
        Ok(response)
    }

    /// Authoritative NXDOMAIN or NODATA carrying the zone SOA in the
    /// authority section.
    pub fn negative(
        request: &Message,
        code: ResponseCode,
        soa: &ServiceRecord,
    ) -> Result<Message, DomainError> {
        let mut response = Self::reply(request, code);
        response.set_authoritative(true);
        response.add_name_server(Self::to_record(soa)?);
        Ok(response)
    }

    pub fn to_record(record: &ServiceRecord) -> Result<Record, DomainError> {
        let rdata = match &record.data {
            RecordData::Address(IpAddr::V4(ipv4)) => RData::A(A(*ipv4)),
            RecordData::Address(IpAddr::V6(ipv6)) => RData::AAAA(AAAA(*ipv6)),
            RecordData::Srv {
                priority,
                weight,
                port,
                target,
            } => RData::SRV(SRV::new(*priority, *weight, *port, parse_name(target)?)),
            RecordData::Ns { target } => RData::NS(NS(parse_name(target)?)),
            RecordData::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => RData::SOA(SOA::new(
                parse_name(mname)?,
                parse_name(rname)?,
                *serial,
                *refresh,
                *retry,
                *expire,
                *minimum,
            )),
        };
        Ok(Record::from_rdata(parse_name(&record.owner)?, record.ttl, rdata))
    }

    pub fn encode(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsMessage(format!("Failed to serialize DNS message: {}", e))
        })?;
        Ok(buf)
    }
}

fn parse_name(name: &str) -> Result<Name, DomainError> {
    Name::from_str(name)
        .map_err(|e| DomainError::InvalidDomainName(format!("Invalid name '{}': {}", name, e)))
}
