mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, schema::SourceColumn};

use std::{borrow::Cow, fmt::Debug};

/// A factory for connections to one foreign source.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// The URL the driver was created from, for logging.
    fn url(&self) -> Cow<'_, str>;

    /// Opens a connection. Dropping the connection releases it.
    async fn connect(&self) -> crate::Result<Box<dyn Connection>>;
}

/// An open connection to a foreign source.
#[async_trait]
pub trait Connection: Debug + Send {
    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> crate::Result<Response>;

    /// Describes the columns of an external table, or `None` when the table
    /// does not exist.
    async fn describe(&mut self, table: &str) -> crate::Result<Option<Vec<SourceColumn>>>;
}
