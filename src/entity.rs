//! Services and service instances, parsed out of DNS-SD names.

use std::{fmt, str::FromStr};

use crate::Name;

const SERVICE_PATTERN: &str = "_[A-Za-z0-9][A-Za-z0-9-]+";
const PROTOCOL_PATTERN: &str = "_tcp or _udp";

/// Errors building a [`Name`], [`Service`] or [`ServiceInstance`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// A dotted name contained an empty label.
    #[error("empty label in {0:?}")]
    EmptyLabel(String),
    /// The name ran out of labels.
    #[error("{name:?} has no label {index}, expected {expected}")]
    MissingLabel {
        /// The offending name.
        name: String,
        /// Position of the missing label.
        index: usize,
        /// What the label should have looked like.
        expected: &'static str,
    },
    /// A label did not have the required form.
    #[error("invalid label {label:?} at position {index} of {name:?}, expected {expected} (see RFC 6763 s. 7)")]
    MalformedLabel {
        /// The offending name.
        name: String,
        /// Position of the label.
        index: usize,
        /// The label itself.
        label: String,
        /// What the label should have looked like.
        expected: &'static str,
    },
    /// A protocol other than TCP or UDP was asked for.
    #[error("invalid protocol {0:?}, must be one of TCP or UDP")]
    InvalidProtocol(String),
}

/// Transport protocol of a service.
///
/// RFC 6763 s. 7 spells every transport other than TCP as `_udp`, so
/// [`Protocol::Udp`] really means "not TCP".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// `_tcp`.
    Tcp,
    /// `_udp`, standing in for any non-TCP transport.
    Udp,
}

impl Protocol {
    /// The DNS label for this protocol.
    pub fn label(self) -> &'static str {
        match self {
            Protocol::Tcp => "_tcp",
            Protocol::Udp => "_udp",
        }
    }
}

impl FromStr for Protocol {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("tcp") {
            Ok(Protocol::Tcp)
        } else if s.eq_ignore_ascii_case("udp") {
            Ok(Protocol::Udp)
        } else {
            Err(NameError::InvalidProtocol(s.to_string()))
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
        })
    }
}

/// A generic service, such as `_http._tcp.example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Service {
    name: String,
    protocol: Protocol,
    fqdn: Name,
}

impl Service {
    /// The service name, without its leading underscore.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The service protocol.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// The full name the service lives at.
    pub fn fqdn(&self) -> &Name {
        &self.fqdn
    }

    /// Names a specific instance of this service. No lookups are made.
    pub fn instance(&self, name: impl Into<String>) -> ServiceInstance {
        let name = name.into();
        ServiceInstance {
            fqdn: self.fqdn.prepend(name.clone()),
            name,
            service: self.clone(),
        }
    }
}

/// One instance of a service, such as `Office Printer._ipp._tcp.example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceInstance {
    name: String,
    service: Service,
    fqdn: Name,
}

impl ServiceInstance {
    /// The instance name: the leftmost label, kept verbatim.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The service this is an instance of.
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// The full name of the instance.
    pub fn fqdn(&self) -> &Name {
        &self.fqdn
    }
}

/// Parses a service out of a name of the form `_service._proto.<domain>`.
///
/// Only the first two labels are checked; `<domain>` can be anything.
pub fn parse_service(fqdn: &Name) -> Result<Service, NameError> {
    let label = fqdn.label(0).ok_or_else(|| missing(fqdn, 0, SERVICE_PATTERN))?;
    let name = label
        .strip_prefix('_')
        .filter(|name| is_service_name(name))
        .ok_or_else(|| malformed(fqdn, 0, label, SERVICE_PATTERN))?;

    let label = fqdn.label(1).ok_or_else(|| missing(fqdn, 1, PROTOCOL_PATTERN))?;
    let protocol = match label.to_ascii_lowercase().as_str() {
        "_tcp" => Protocol::Tcp,
        "_udp" => Protocol::Udp,
        _ => return Err(malformed(fqdn, 1, label, PROTOCOL_PATTERN)),
    };

    Ok(Service {
        name: name.to_string(),
        protocol,
        fqdn: fqdn.clone(),
    })
}

/// Parses a service instance out of a name of the form
/// `<instance>._service._proto.<domain>`. As with [`parse_service`], the
/// domain is not checked.
pub fn parse_service_instance(fqdn: &Name) -> Result<ServiceInstance, NameError> {
    let name = fqdn
        .label(0)
        .ok_or_else(|| missing(fqdn, 0, "an instance name"))?;
    let service = parse_service(&fqdn.tail(1)).map_err(|e| match e {
        NameError::MissingLabel { index, expected, .. } => missing(fqdn, index + 1, expected),
        NameError::MalformedLabel {
            index,
            label,
            expected,
            ..
        } => malformed(fqdn, index + 1, &label, expected),
        other => other,
    })?;

    Ok(ServiceInstance {
        name: name.to_string(),
        service,
        fqdn: fqdn.clone(),
    })
}

// `[A-Za-z0-9][A-Za-z0-9-]+`
fn is_service_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphanumeric())
        && name.len() >= 2
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn missing(fqdn: &Name, index: usize, expected: &'static str) -> NameError {
    NameError::MissingLabel {
        name: fqdn.to_string(),
        index,
        expected,
    }
}

fn malformed(fqdn: &Name, index: usize, label: &str, expected: &'static str) -> NameError {
    NameError::MalformedLabel {
        name: fqdn.to_string(),
        index,
        label: label.to_string(),
        expected,
    }
}
