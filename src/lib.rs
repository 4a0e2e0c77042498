#![deny(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

/*!
Rust client for browsing services advertised with DNS-SD.

# Introduction

DNS-Based Service Discovery, as defined in
[RFC 6763](https://tools.ietf.org/html/rfc6763), describes services with
plain DNS records:

```text
_services._dns-sd._udp.example.com. 3600 IN PTR _http._tcp.example.com.
_http._tcp.example.com.             3600 IN PTR web._http._tcp.example.com.
web._http._tcp.example.com.           60 IN SRV 1 100 443 test1.example.com.
web._http._tcp.example.com.           60 IN SRV 2 50  443 test2.example.com.
web._http._tcp.example.com.           60 IN TXT "txtvers=1" "path=/"
```

The first record says the domain offers an `http` service over TCP; the
second names one instance of it, `web`. That instance is served by
`test1.example.com:443` first and `test2.example.com:443` should the former
be unavailable (SRV records, [RFC 2782](https://tools.ietf.org/html/rfc2782)),
and carries some key/value metadata in its TXT record.

`dnssd-rs` handles the lookup and caching of these records, parsing of
service and instance names, decoding of instance metadata, and the weighted
random ordering of SRV targets.

[`DnsSd::new`] creates a client (that should be reused to take advantage of
caching) for a domain. [`DnsSd::services`], [`DnsSd::instances`],
[`DnsSd::data`] and [`DnsSd::targets`] walk from the domain down to the
host/port pairs to connect to. Records are cached for as long as their TTLs
allow; target order is drawn afresh on every call.

# Alternative Resolvers

Records are fetched through the [`Resolver`] trait. The provided backends
are enabled by the following features:

- `hickory` (via [`hickory_resolver::Resolver`])

[`Resolver`]: resolver::Resolver
*/

mod client;
pub use client::{
    CacheEntry, CacheKey, Clock, DnsSd, Error, ResolutionCache, SystemClock,
};

pub mod entity;
pub use entity::{NameError, Protocol, Service, ServiceInstance};

pub mod metadata;
pub use metadata::Metadata;

mod name;
pub use name::Name;

mod record;
pub use record::{Ptr, RecordData, RecordType, ResourceRecord, Srv, SrvRecord, Target, Txt};

pub mod resolver;

pub mod select;

#[cfg(test)]
mod testing;
