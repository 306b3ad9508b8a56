use crate::{driver, Result};

use chartbridge_core::{
    driver::{Connection, Driver, Operation, Response},
    err,
    schema::Table,
    Error,
};
use std::{fmt, future::Future, sync::Arc, time::Duration};

/// A named foreign data source.
///
/// Every read names its source explicitly; there is no default source.
/// Cloning is cheap and clones share the driver.
#[derive(Clone)]
pub struct Source {
    name: String,
    driver: Arc<dyn Driver>,
    timeout: Option<Duration>,
}

impl Source {
    pub fn new(name: impl Into<String>, driver: impl Driver) -> Self {
        Self::from_driver(name, Arc::new(driver))
    }

    pub fn from_driver(name: impl Into<String>, driver: Arc<dyn Driver>) -> Self {
        Self {
            name: name.into(),
            driver,
            timeout: None,
        }
    }

    /// Creates a source from a connection URL such as `sqlite::memory:` or
    /// `sqlite:/path/to/sales.db`.
    pub fn from_url(name: impl Into<String>, url: &str) -> Result<Self> {
        Ok(Self::from_driver(name, driver::from_url(url)?))
    }

    /// Bounds every connect and query on this source. Expiry is reported as
    /// a connection error.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Opens a connection and verifies `table` against the external table.
    pub(crate) async fn connect_verified(&self, table: &Table) -> Result<Box<dyn Connection>> {
        let mut connection = self.bounded(self.driver.connect()).await?;

        let Some(columns) = self.bounded(connection.describe(&table.name)).await? else {
            return Err(Error::schema_mismatch(format!(
                "table `{}` does not exist in source `{}`",
                table.name, self.name
            )));
        };

        table.verify(&columns)?;

        Ok(connection)
    }

    pub(crate) async fn exec(
        &self,
        connection: &mut Box<dyn Connection>,
        op: Operation,
    ) -> Result<Response> {
        self.bounded(connection.exec(op)).await
    }

    async fn bounded<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        let Some(timeout) = self.timeout else {
            return fut.await;
        };

        match tokio::time::timeout(timeout, fut).await {
            Ok(res) => res,
            Err(elapsed) => Err(Error::connection(elapsed).context(err!(
                "source `{}` did not respond within {}ms",
                self.name,
                timeout.as_millis()
            ))),
        }
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("name", &self.name)
            .field("url", &self.driver.url())
            .field("timeout", &self.timeout)
            .finish()
    }
}
