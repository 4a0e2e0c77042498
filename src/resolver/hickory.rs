//! Resolver backed by [`hickory_resolver`].

use super::Resolver as DnsSdResolver;
use crate::{
    record::{Ptr, RecordData, Srv, Txt},
    Name, RecordType, ResourceRecord, SrvRecord,
};
use async_trait::async_trait;
use hickory_resolver::{
    name_server::ConnectionProvider,
    proto::rr::{self, rdata::SRV, RData},
    ResolveError, Resolver,
};

#[async_trait]
impl<P> DnsSdResolver for Resolver<P>
where
    P: ConnectionProvider,
{
    type Error = ResolveError;

    async fn query(
        &self,
        name: &Name,
        rtype: RecordType,
    ) -> Result<Vec<ResourceRecord>, Self::Error> {
        let query_name = to_hickory(name)?;
        let lookup = match self.lookup(query_name, to_hickory_type(rtype)).await {
            Ok(lookup) => lookup,
            Err(e) if e.is_no_records_found() => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        Ok(lookup
            .record_iter()
            .filter_map(|record| {
                let data = match record.data() {
                    RData::PTR(ptr) => RecordData::Ptr(Ptr {
                        target: from_hickory(&ptr.0),
                    }),
                    RData::SRV(srv) => RecordData::Srv(Srv {
                        priority: srv.priority(),
                        weight: srv.weight(),
                        port: srv.port(),
                        target: from_hickory(srv.target()),
                    }),
                    RData::TXT(txt) => RecordData::Txt(Txt {
                        strings: txt.txt_data().iter().map(|s| s.to_vec()).collect(),
                    }),
                    // CNAMEs and friends picked up while chasing the name
                    _ => return None,
                };
                (data.record_type() == rtype)
                    .then(|| ResourceRecord::new(from_hickory(record.name()), record.ttl(), data))
            })
            .collect())
    }
}

impl SrvRecord for SRV {
    type Target = rr::Name;

    fn target(&self) -> &Self::Target {
        self.target()
    }

    fn port(&self) -> u16 {
        self.port()
    }

    fn priority(&self) -> u16 {
        self.priority()
    }

    fn weight(&self) -> u16 {
        self.weight()
    }
}

fn to_hickory_type(rtype: RecordType) -> rr::RecordType {
    match rtype {
        RecordType::Ptr => rr::RecordType::PTR,
        RecordType::Srv => rr::RecordType::SRV,
        RecordType::Txt => rr::RecordType::TXT,
    }
}

fn to_hickory(name: &Name) -> Result<rr::Name, ResolveError> {
    Ok(rr::Name::from_labels(
        name.labels().iter().map(|label| label.as_bytes()),
    )?)
}

fn from_hickory(name: &rr::Name) -> Name {
    Name::from_labels(
        name.iter()
            .map(|label| String::from_utf8_lossy(label).into_owned()),
    )
}
