use crate::Result;

pub use chartbridge_core::driver::{
    operation::{self, Operation},
    Connection, Driver, Response, Rows,
};

#[cfg(feature = "sqlite")]
pub use chartbridge_driver_sqlite::Sqlite;

use chartbridge_core::Error;
use std::sync::Arc;
use url::Url;

/// Creates the driver matching a connection URL's scheme.
pub fn from_url(url: &str) -> Result<Arc<dyn Driver>> {
    let parsed = Url::parse(url)
        .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

    match parsed.scheme() {
        "sqlite" => connect_sqlite(url),
        scheme => Err(Error::invalid_connection_url(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Arc<dyn Driver>> {
    Ok(Arc::new(Sqlite::new(url)?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(url: &str) -> Result<Arc<dyn Driver>> {
    Err(Error::invalid_connection_url(format!(
        "`sqlite` feature not enabled; url={url}"
    )))
}
