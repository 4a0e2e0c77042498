//! DNS resource records consumed by DNS-SD lookups.

use std::fmt::{self, Display};

use crate::Name;

/// Representation of types that contain the fields of a SRV record.
pub trait SrvRecord {
    /// Type representing the SRV record's target. Must implement `Display` so
    /// it can be turned into a [`Target`] hostname.
    type Target: Display + ?Sized;

    /// Gets a SRV record's target.
    fn target(&self) -> &Self::Target;

    /// Gets a SRV record's port.
    fn port(&self) -> u16;

    /// Gets a SRV record's priority.
    fn priority(&self) -> u16;

    /// Gets a SRV record's weight.
    fn weight(&self) -> u16;

    /// Converts a SRV record into the host/port pair it points at.
    fn to_target(&self) -> Target {
        Target::new(self.target().to_string(), self.port())
    }
}

/// The record types DNS-SD browsing asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// Pointer records, used to enumerate services and instances.
    Ptr,
    /// Service location records.
    Srv,
    /// Text records, carrying instance metadata.
    Txt,
}

impl Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordType::Ptr => "PTR",
            RecordType::Srv => "SRV",
            RecordType::Txt => "TXT",
        })
    }
}

/// A single resource record as handed over by a [`Resolver`](crate::resolver::Resolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    /// Owner name of the record.
    pub name: Name,
    /// Time-to-live, in seconds.
    pub ttl: u32,
    /// Type-specific payload.
    pub data: RecordData,
}

impl ResourceRecord {
    /// Creates a record.
    pub fn new(name: Name, ttl: u32, data: impl Into<RecordData>) -> Self {
        Self {
            name,
            ttl,
            data: data.into(),
        }
    }

    /// The type of this record's payload.
    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }
}

/// Payload of a [`ResourceRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// PTR payload.
    Ptr(Ptr),
    /// SRV payload.
    Srv(Srv),
    /// TXT payload.
    Txt(Txt),
}

impl RecordData {
    /// The record type tag matching this payload.
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::Ptr(_) => RecordType::Ptr,
            RecordData::Srv(_) => RecordType::Srv,
            RecordData::Txt(_) => RecordType::Txt,
        }
    }

    /// Gets the PTR payload, if this is one.
    pub fn as_ptr(&self) -> Option<&Ptr> {
        match self {
            RecordData::Ptr(ptr) => Some(ptr),
            _ => None,
        }
    }

    /// Gets the SRV payload, if this is one.
    pub fn as_srv(&self) -> Option<&Srv> {
        match self {
            RecordData::Srv(srv) => Some(srv),
            _ => None,
        }
    }

    /// Gets the TXT payload, if this is one.
    pub fn as_txt(&self) -> Option<&Txt> {
        match self {
            RecordData::Txt(txt) => Some(txt),
            _ => None,
        }
    }
}

/// PTR record payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ptr {
    /// The name pointed to.
    pub target: Name,
}

impl From<Ptr> for RecordData {
    fn from(ptr: Ptr) -> Self {
        RecordData::Ptr(ptr)
    }
}

/// SRV record payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Srv {
    /// Priority; lower is tried first.
    pub priority: u16,
    /// Relative weight within a priority.
    pub weight: u16,
    /// Port the target listens on.
    pub port: u16,
    /// Host implementing the service.
    pub target: Name,
}

impl From<Srv> for RecordData {
    fn from(srv: Srv) -> Self {
        RecordData::Srv(srv)
    }
}

impl SrvRecord for Srv {
    type Target = Name;

    fn target(&self) -> &Self::Target {
        &self.target
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn priority(&self) -> u16 {
        self.priority
    }

    fn weight(&self) -> u16 {
        self.weight
    }
}

/// TXT record payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Txt {
    /// Character strings, in wire order.
    pub strings: Vec<Vec<u8>>,
}

impl From<Txt> for RecordData {
    fn from(txt: Txt) -> Self {
        RecordData::Txt(txt)
    }
}

/// A host and port to connect to; the end product of service discovery.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    /// Host to resolve.
    pub hostname: String,
    /// Port to connect to.
    pub port: u16,
}

impl Target {
    /// Creates a target.
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self {
            hostname: hostname.into(),
            port,
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hostname, self.port)
    }
}
