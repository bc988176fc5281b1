use crate::config::Config;
use crate::error::Error;
use crate::update::request::ValidUpdate;
use std::net::IpAddr;
use std::str::FromStr;
use trust_dns_client::op::{Message, MessageType, OpCode, Query, UpdateMessage};
use trust_dns_client::rr::{DNSClass, Name, RData, Record, RecordType};

/// The `A` record a request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ARecord {
    pub name: String,
    pub ttl: u32,
    pub address: Option<IpAddr>,
}

/// One change in the update section of a DNS UPDATE message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Delete every record of `record_type` at `name`.
    RemoveRRset { name: String, record_type: RecordType },
    /// Add the record to its (now empty) RRset.
    Insert(ARecord),
}

/// A DNS UPDATE that replaces the `A` RRset of one name in the configured zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTransaction {
    pub zone: String,
    pub record: ARecord,
    /// The IP exactly as the client sent it, used in error messages.
    pub raw_ip: String,
}

impl UpdateTransaction {
    #[must_use]
    pub fn build(update: &ValidUpdate, config: &Config) -> Self {
        UpdateTransaction {
            zone: config.zone.clone(),
            record: ARecord {
                name: update.fqdn.clone(),
                ttl: config.ttl,
                address: update.address,
            },
            raw_ip: update.raw_ip.clone(),
        }
    }

    /// The ordered update operations: remove the existing RRset, then insert the new record.
    #[must_use]
    pub fn operations(&self) -> [Operation; 2] {
        [
            Operation::RemoveRRset {
                name: self.record.name.clone(),
                record_type: RecordType::A,
            },
            Operation::Insert(self.record.clone()),
        ]
    }

    /// Encode as a DNS UPDATE message (RFC 2136). The message ID and TSIG record are
    /// added by the client when it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnencodableAddress`] if the record has no IPv4 address, and
    /// [`Error::DNSError`] if the zone or record name isn't a valid DNS name.
    pub fn to_message(&self) -> Result<Message, Error> {
        let mut zone = Query::new();
        zone.set_name(Name::from_str(&self.zone)?)
            .set_query_class(DNSClass::IN)
            .set_query_type(RecordType::SOA);

        let updates = self
            .operations()
            .iter()
            .map(|op| self.to_record(op))
            .collect::<Result<Vec<_>, _>>()?;

        let mut message = Message::new();
        message
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Update)
            .set_recursion_desired(false);
        message.add_zone(zone);
        message.add_updates(updates);
        Ok(message)
    }

    fn to_record(&self, op: &Operation) -> Result<Record, Error> {
        match op {
            Operation::RemoveRRset { name, record_type } => {
                // RFC 2136 2.5.2: class ANY, TTL 0 and empty RDATA deletes the RRset.
                let mut record = Record::with(Name::from_str(name)?, *record_type, 0);
                record.set_dns_class(DNSClass::ANY);
                Ok(record)
            }
            Operation::Insert(a) => {
                let Some(IpAddr::V4(address)) = a.address else {
                    return Err(Error::UnencodableAddress(self.raw_ip.clone()));
                };
                let mut record = Record::from_rdata(Name::from_str(&a.name)?, a.ttl, RData::A(address));
                record.set_dns_class(DNSClass::IN);
                Ok(record)
            }
        }
    }
}
