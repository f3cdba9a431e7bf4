use anyhow::Result;
use tracing::{error, info};

/// Builds an OData service for one service definition.
pub trait ODataServiceFactory {
    type Definition;
    type Service;

    fn create(&self, path: &str, definition: &Self::Definition) -> Result<Self::Service>;
}

/// Builds one service per `(path, definition)` pair, in order.
///
/// A definition that fails to build is logged and skipped; it never prevents
/// the remaining services from being registered.
pub fn create_services<F>(definitions: &[(String, F::Definition)], factory: &F) -> Vec<F::Service>
where
    F: ODataServiceFactory,
{
    let mut services = Vec::with_capacity(definitions.len());

    for (path, definition) in definitions {
        match factory.create(path, definition) {
            Ok(service) => {
                info!(path = %path, "Registered OData handler");
                services.push(service);
            }
            Err(err) => {
                error!(path = %path, error = %format!("{err:#}"), "Failed to register OData handler");
            }
        }
    }

    services
}
