//! Clients browsing a DNS-SD domain.

use crate::{
    entity::{parse_service, parse_service_instance, NameError, Protocol, Service, ServiceInstance},
    metadata::Metadata,
    record::{RecordData, Srv, Target},
    resolver::Resolver,
    select::{self, RandomSource},
    Name, RecordType, ResourceRecord,
};
use std::{collections::HashMap, fmt::Debug, time::Instant};

mod cache;
pub use cache::{CacheEntry, CacheKey, Clock, ResolutionCache, SystemClock};

/// Errors encountered by a [`DnsSd`].
#[derive(Debug, thiserror::Error)]
pub enum Error<Lookup: Debug> {
    /// DNS lookup errors
    #[error("DNS lookup error")]
    Lookup(Lookup),
    /// Names that do not have the shape DNS-SD requires
    #[error(transparent)]
    Name(#[from] NameError),
}

/// Client for browsing the services advertised in one DNS-SD domain.
///
/// # Usage
///
/// [`DnsSd::services`] enumerates the services a domain advertises through
/// its `_services._dns-sd._udp` records. If you already know the service, or
/// even the instance, you want, [`DnsSd::service`] and
/// [`DnsSd::service_instance`] name it directly without touching DNS.
/// From there, [`DnsSd::instances`] lists a service's instances, and
/// [`DnsSd::data`] and [`DnsSd::targets`] give an instance's metadata and
/// the ordered list of hosts to connect to.
///
/// ## Caching
///
/// Every lookup goes through a single [`ResolutionCache`] owned by the
/// client, so a client should be reused to benefit from it. Records are
/// served from the cache until their TTL runs out.
///
/// ## DNS Resolvers
///
/// The resolver used to look up records is determined by a client's
/// [`Resolver`], and can be set with [`DnsSd::resolver`].
#[derive(Debug)]
pub struct DnsSd<R, C = SystemClock> {
    domain: Name,
    cache: ResolutionCache<R, C>,
}

impl<R> DnsSd<R> {
    /// Creates a new client browsing `domain`.
    pub fn new(domain: Name, resolver: R) -> Self {
        Self {
            domain,
            cache: ResolutionCache::new(resolver),
        }
    }
}

impl<R, C> DnsSd<R, C> {
    /// The domain being browsed.
    pub fn domain(&self) -> &Name {
        &self.domain
    }

    /// The cache lookups go through.
    pub fn cache(&self) -> &ResolutionCache<R, C> {
        &self.cache
    }

    /// Names the service `_<name>._<protocol>.<domain>`. No lookups are made,
    /// so the service may well turn out to have no instances.
    pub fn service(&self, name: &str, protocol: Protocol) -> Result<Service, NameError> {
        let fqdn = self
            .domain
            .prepend(protocol.label())
            .prepend(format!("_{name}"));
        parse_service(&fqdn)
    }

    /// Names the instance `<name>` of the service `_<service>._<protocol>.<domain>`.
    pub fn service_instance(
        &self,
        name: &str,
        service: &str,
        protocol: Protocol,
    ) -> Result<ServiceInstance, NameError> {
        Ok(self.service(service, protocol)?.instance(name))
    }

    /// When the cached instance list of `service` expires: `None` if it was
    /// never looked up, possibly in the past if it went stale.
    ///
    /// Handy for pollers, which would only get the cached answer back by
    /// asking again before then.
    pub fn cached_until(&self, service: &Service) -> Option<Instant> {
        self.cache.expiry_of(service.fqdn(), RecordType::Ptr)
    }

    /// Sets the domain of the client. Cached records are kept.
    pub fn domain_name(self, domain: Name) -> Self {
        Self { domain, ..self }
    }

    /// Sets the resolver of the client, starting over with an empty cache.
    pub fn resolver<R2>(self, resolver: R2) -> DnsSd<R2, C> {
        let (_, clock) = self.cache.into_parts();
        DnsSd {
            domain: self.domain,
            cache: ResolutionCache::with_clock(resolver, clock),
        }
    }

    /// Sets the clock of the client, starting over with an empty cache.
    pub fn clock<C2>(self, clock: C2) -> DnsSd<R, C2> {
        let (resolver, _) = self.cache.into_parts();
        DnsSd {
            domain: self.domain,
            cache: ResolutionCache::with_clock(resolver, clock),
        }
    }
}

impl<R: Resolver, C: Clock> DnsSd<R, C> {
    async fn lookup(
        &self,
        name: &Name,
        rtype: RecordType,
    ) -> Result<Vec<ResourceRecord>, Error<R::Error>> {
        self.cache.lookup(name, rtype).await.map_err(|e| {
            #[cfg(feature = "log")]
            tracing::debug!(%name, %rtype, error = %e, "lookup failed");
            Error::Lookup(e)
        })
    }

    /// Enumerates the services advertised in the domain, indexed by name.
    ///
    /// This reads the "Service Type Enumeration" PTR records at
    /// `_services._dns-sd._udp.<domain>` (RFC 6763 s. 9). When two records
    /// name the same service, the later one wins. Pointed-to names are not
    /// checked against the client's domain.
    pub async fn services(&self) -> Result<HashMap<String, Service>, Error<R::Error>> {
        let fqdn = Name::from_labels(["_services", "_dns-sd", "_udp"]).join(&self.domain);
        let mut services = HashMap::new();
        for target in ptr_targets(self.lookup(&fqdn, RecordType::Ptr).await?) {
            let service = parse_service(&target)?;
            services.insert(service.name().to_string(), service);
        }
        Ok(services)
    }

    /// Enumerates the instances of `service`, indexed by instance name.
    ///
    /// When two records share an instance name, the later one wins.
    /// Pointed-to names are not checked against the service's domain.
    pub async fn instances(
        &self,
        service: &Service,
    ) -> Result<HashMap<String, ServiceInstance>, Error<R::Error>> {
        let mut instances = HashMap::new();
        for target in ptr_targets(self.lookup(service.fqdn(), RecordType::Ptr).await?) {
            let instance = parse_service_instance(&target)?;
            instances.insert(instance.name().to_string(), instance);
        }
        Ok(instances)
    }

    /// Gets the metadata of `instance` from its TXT records (RFC 6763 s. 6).
    pub async fn data(&self, instance: &ServiceInstance) -> Result<Metadata, Error<R::Error>> {
        let records = self.lookup(instance.fqdn(), RecordType::Txt).await?;
        Ok(Metadata::parse(records.iter().flat_map(|record| {
            record
                .data
                .as_txt()
                .map(|txt| txt.strings.as_slice())
                .unwrap_or_default()
        })))
    }

    /// Gets the targets of `instance`, in the order they should be tried.
    ///
    /// The order is drawn afresh on every call, even when the records come
    /// from the cache, so call this again before each new connection to keep
    /// the weight-based spread of load.
    pub async fn targets(&self, instance: &ServiceInstance) -> Result<Vec<Target>, Error<R::Error>> {
        let srvs = self.srv_records(instance).await?;
        Ok(select::order(&srvs, &mut rand::rng()))
    }

    /// Like [`DnsSd::targets`], drawing randomness from `rng`.
    pub async fn targets_with<Source>(
        &self,
        instance: &ServiceInstance,
        rng: &mut Source,
    ) -> Result<Vec<Target>, Error<R::Error>>
    where
        Source: RandomSource + ?Sized,
    {
        let srvs = self.srv_records(instance).await?;
        Ok(select::order(&srvs, rng))
    }

    async fn srv_records(&self, instance: &ServiceInstance) -> Result<Vec<Srv>, Error<R::Error>> {
        let records = self.lookup(instance.fqdn(), RecordType::Srv).await?;
        Ok(records
            .into_iter()
            .filter_map(|record| match record.data {
                RecordData::Srv(srv) => Some(srv),
                _ => None,
            })
            .collect())
    }
}

fn ptr_targets(records: Vec<ResourceRecord>) -> impl Iterator<Item = Name> {
    records.into_iter().filter_map(|record| match record.data {
        RecordData::Ptr(ptr) => Some(ptr.target),
        _ => None,
    })
}
