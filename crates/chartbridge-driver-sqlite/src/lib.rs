mod describe;

mod value;
pub(crate) use value::Value;

use chartbridge_core::{
    async_trait,
    driver::{Driver, Operation, Response},
    schema::{SourceColumn, Table},
    stmt, Error, Result,
};
use chartbridge_sql as sql;
use rusqlite::{Connection as RusqliteConnection, ErrorCode, InterruptHandle, OpenFlags};
use std::{
    borrow::Cow,
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::{Mutex, OwnedMutexGuard};
use url::Url;

#[derive(Debug, Clone)]
pub enum Sqlite {
    File(PathBuf),

    /// A single in-memory database shared by every connection. Access is
    /// serialized: a connection holds the lock until it is dropped.
    InMemory(Arc<Mutex<RusqliteConnection>>),
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Self::in_memory()
        } else if url.path().is_empty() {
            Err(Error::invalid_connection_url(format!(
                "connection URL does not name a database file; url={url_str}"
            )))
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::connection)?;
        Ok(Self::InMemory(Arc::new(Mutex::new(connection))))
    }

    /// Open a SQLite database at the specified file path. The file must
    /// already exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    /// Runs a batch of SQL statements, e.g. to seed a database.
    pub async fn execute_batch(&self, sql: &str) -> Result<()> {
        let sql = sql.to_string();
        let mut connection = self.connect_sqlite().await?;
        connection
            .run(move |connection| connection.execute_batch(&sql).map_err(Connection::map_err))
            .await
    }

    async fn connect_sqlite(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory(shared) => Ok(Connection::from_handle(Handle::Shared(
                shared.clone().lock_owned().await,
            ))),
        }
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory(_) => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    async fn connect(&self) -> Result<Box<dyn chartbridge_core::Connection>> {
        Ok(Box::new(self.connect_sqlite().await?))
    }
}

#[derive(Debug)]
enum Handle {
    Owned(RusqliteConnection),
    Shared(OwnedMutexGuard<RusqliteConnection>),
}

impl Handle {
    fn get(&self) -> &RusqliteConnection {
        match self {
            Handle::Owned(connection) => connection,
            Handle::Shared(guard) => &**guard,
        }
    }
}

/// A connection to a SQLite database.
///
/// Statements run on tokio's blocking pool. Dropping an in-flight `exec` or
/// `describe` future, as a timeout does, interrupts the running statement.
#[derive(Debug)]
pub struct Connection {
    /// `None` while a statement holds the connection on the blocking pool
    handle: Option<Handle>,
}

impl Connection {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        // Never create the file: the source is foreign and must already exist.
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let connection =
            RusqliteConnection::open_with_flags(path, flags).map_err(Error::connection)?;
        Ok(Self::from_handle(Handle::Owned(connection)))
    }

    fn from_handle(handle: Handle) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    fn map_err(err: rusqlite::Error) -> Error {
        if err.sqlite_error_code() == Some(ErrorCode::OperationInterrupted) {
            return Error::connection(err);
        }

        let message = err.to_string();
        if message.contains("no such table") || message.contains("no such column") {
            Error::schema_mismatch(message)
        } else {
            Error::driver(err)
        }
    }

    /// Runs `f` against the connection on the blocking pool.
    async fn run<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&RusqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let Some(handle) = self.handle.take() else {
            return Err(Error::connection(Interrupted));
        };

        let interrupt = InterruptOnDrop(Some(handle.get().get_interrupt_handle()));

        let (handle, res) = tokio::task::spawn_blocking(move || {
            let res = f(handle.get());
            (handle, res)
        })
        .await
        .map_err(Error::driver)?;

        interrupt.disarm();
        self.handle = Some(handle);
        res
    }

    fn query(
        connection: &RusqliteConnection,
        table: &Table,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<stmt::ValueRecord>> {
        let mut stmt = connection.prepare_cached(sql).map_err(Self::map_err)?;

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Self::map_err)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(Self::map_err)? {
            let mut items = Vec::with_capacity(table.columns.len());

            for (index, column) in table.columns.iter().enumerate() {
                items.push(Value::from_sql(row, index, table, column)?.into_inner());
            }

            ret.push(stmt::ValueRecord::from_vec(items));
        }

        log::debug!("sqlite returned {} rows from `{}`", ret.len(), table.name);

        Ok(ret)
    }

    fn execute(connection: &RusqliteConnection, sql: &str, params: &[Value]) -> Result<u64> {
        let mut stmt = connection.prepare_cached(sql).map_err(Self::map_err)?;

        let count = stmt
            .execute(rusqlite::params_from_iter(params.iter()))
            .map_err(Self::map_err)?;

        Ok(count as u64)
    }
}

#[async_trait]
impl chartbridge_core::driver::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        let sql: sql::Statement = op.into();

        let mut params: Vec<stmt::Value> = vec![];
        let sql_str = sql::Serializer::sqlite().serialize(&sql, &mut params);

        log::debug!("sqlite: {sql_str}; params={params:?}");

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        self.run(move |connection| {
            if sql.is_select() {
                let rows = Self::query(connection, sql.table(), &sql_str, &params)?;
                Ok(Response::values(rows))
            } else {
                let count = Self::execute(connection, &sql_str, &params)?;
                Ok(Response::count(count))
            }
        })
        .await
    }

    async fn describe(&mut self, table: &str) -> Result<Option<Vec<SourceColumn>>> {
        let table = table.to_string();
        self.run(move |connection| describe::describe(connection, &table))
            .await
    }
}

/// Interrupts the statement running on a connection unless disarmed.
struct InterruptOnDrop(Option<InterruptHandle>);

impl InterruptOnDrop {
    fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for InterruptOnDrop {
    fn drop(&mut self) {
        if let Some(handle) = self.0.take() {
            log::debug!("sqlite: interrupting a cancelled statement");
            handle.interrupt();
        }
    }
}

/// A previous statement on this connection was cancelled mid-flight.
#[derive(Debug)]
struct Interrupted;

impl std::error::Error for Interrupted {}

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("connection was lost to an interrupted statement")
    }
}
