/// Catalog loader
/// Fetches services and artists concurrently. The two fetches are
/// independent failure domains; either half falls back to the built-in
/// defaults on error or on an empty response, so callers never see a
/// failure here.
use std::time::Duration;

use booking_core::{resolve_artists, resolve_services, Artist, Service};

use crate::api::ApiGateway;

const CATALOG_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub services: Vec<Service>,
    pub artists: Vec<Artist>,
}

#[derive(Clone)]
pub struct CatalogLoader {
    gateway: ApiGateway,
}

impl CatalogLoader {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn load(&self) -> Catalog {
        let (services, artists) = tokio::join!(
            self.gateway
                .get_json::<Vec<Service>>("/services", CATALOG_TIMEOUT),
            self.gateway
                .get_json::<Vec<Artist>>("/artists", CATALOG_TIMEOUT),
        );

        let services = resolve_services(match services {
            Ok(list) => Some(list),
            Err(err) => {
                tracing::warn!("service catalog unavailable, using built-in defaults: {err}");
                None
            }
        });

        let artists = resolve_artists(match artists {
            Ok(list) => Some(list),
            Err(err) => {
                tracing::warn!("artist catalog unavailable, using built-in defaults: {err}");
                None
            }
        });

        Catalog { services, artists }
    }
}
