//! Database catalog introspection
//!
//! [`SqlCatalog`] queries the information schema of MySQL / MariaDB or
//! PostgreSQL, or `pragma_table_info` on SQLite. [`StaticCatalog`] serves
//! columns from memory.

use std::collections::HashMap;

use sqlx::{
    mysql::MySqlPoolOptions, postgres::PgPoolOptions, sqlite::SqlitePoolOptions, FromRow,
    MySqlPool, PgPool, SqlitePool,
};
use tokio::runtime::Runtime;

use crate::error::{Result, ScaffoldError};

/// Key marker for primary key columns
pub const PRIMARY_KEY: &str = "PRI";

const MYSQL_COLUMNS: &str = r"
SELECT CAST(COLUMN_NAME AS CHAR) AS column_name,
       CAST(DATA_TYPE AS CHAR) AS data_type,
       CAST(IS_NULLABLE AS CHAR) AS is_nullable,
       CAST(COLUMN_KEY AS CHAR) AS column_key,
       CAST(CHARACTER_MAXIMUM_LENGTH AS SIGNED) AS max_length,
       CAST(COLUMN_DEFAULT AS CHAR) AS default_value
FROM INFORMATION_SCHEMA.COLUMNS
WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
ORDER BY ORDINAL_POSITION";

const POSTGRES_COLUMNS: &str = r"
SELECT c.column_name::text AS column_name,
       c.data_type::text AS data_type,
       c.is_nullable::text AS is_nullable,
       CASE WHEN EXISTS (
           SELECT 1
           FROM information_schema.table_constraints tc
           JOIN information_schema.key_column_usage kcu
             ON tc.constraint_name = kcu.constraint_name
            AND tc.table_schema = kcu.table_schema
           WHERE tc.constraint_type = 'PRIMARY KEY'
             AND tc.table_schema = c.table_schema
             AND tc.table_name = c.table_name
             AND kcu.column_name = c.column_name
       ) THEN 'PRI'::text ELSE ''::text END AS column_key,
       c.character_maximum_length::bigint AS max_length,
       c.column_default::text AS default_value
FROM information_schema.columns c
WHERE c.table_schema = current_schema() AND c.table_name = $1
ORDER BY c.ordinal_position";

const SQLITE_COLUMNS: &str = r#"
SELECT name AS column_name,
       lower(type) AS data_type,
       CASE WHEN "notnull" = 0 THEN 'YES' ELSE 'NO' END AS is_nullable,
       CASE WHEN pk > 0 THEN 'PRI' ELSE '' END AS column_key,
       NULL AS max_length,
       dflt_value AS default_value
FROM pragma_table_info(?)
ORDER BY cid"#;

/// One column row as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumn {
    /// Column name
    pub column_name: String,
    /// Scalar type name, lower-case (`varchar`, `text`, `int`)
    pub data_type: String,
    /// Whether the column accepts `NULL`
    pub nullable: bool,
    /// Key marker (`PRI` for primary key columns, empty otherwise)
    pub column_key: String,
    /// Character maximum length
    pub max_length: Option<i64>,
    /// Column default expression
    pub default_value: Option<String>,
}

impl CatalogColumn {
    /// A `NOT NULL`, non-key column without length or default
    pub fn new(column_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            data_type: data_type.into(),
            nullable: false,
            column_key: String::new(),
            max_length: None,
            default_value: None,
        }
    }

    /// Mark the column nullable
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column as part of the primary key
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.column_key = PRIMARY_KEY.to_string();
        self
    }

    /// Set the character maximum length
    #[must_use]
    pub const fn max_length(mut self, max_length: i64) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the default expression
    #[must_use]
    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Whether the key marker is `PRI`
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.column_key == PRIMARY_KEY
    }
}

#[derive(Debug, FromRow)]
struct ColumnRow {
    column_name: String,
    data_type: String,
    is_nullable: String,
    column_key: String,
    max_length: Option<i64>,
    default_value: Option<String>,
}

impl From<ColumnRow> for CatalogColumn {
    fn from(row: ColumnRow) -> Self {
        let (data_type, declared_length) = split_declared_type(&row.data_type);

        Self {
            column_name: row.column_name,
            data_type,
            nullable: row.is_nullable.eq_ignore_ascii_case("YES"),
            column_key: row.column_key,
            max_length: row.max_length.or(declared_length),
            default_value: row.default_value,
        }
    }
}

/// Split a declared type such as `varchar(255)` into `("varchar", Some(255))`
fn split_declared_type(declared: &str) -> (String, Option<i64>) {
    let declared = declared.trim().to_ascii_lowercase();
    match declared.split_once('(') {
        Some((base, rest)) => {
            let length = rest.trim_end_matches(')').trim().parse().ok();
            (base.trim().to_string(), length)
        }
        None => (declared, None),
    }
}

/// Source of table column metadata
pub trait Catalog {
    /// Columns of `table` in ordinal order; empty when the table does not exist
    fn columns(&self, table: &str) -> Result<Vec<CatalogColumn>>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn columns(&self, table: &str) -> Result<Vec<CatalogColumn>> {
        (**self).columns(table)
    }
}

/// Catalog backend, chosen from the URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    /// MySQL or MariaDB
    MySql,
    /// PostgreSQL
    Postgres,
    /// SQLite
    Sqlite,
}

impl DatabaseBackend {
    /// Detect the backend from a connection URL
    ///
    /// # Examples
    ///
    /// ```
    /// # use vilt_scaffold::schema::catalog::DatabaseBackend;
    /// assert_eq!(
    ///     DatabaseBackend::from_url("mariadb://root@localhost/blog").unwrap(),
    ///     DatabaseBackend::MySql
    /// );
    /// assert!(DatabaseBackend::from_url("oracle://db").is_err());
    /// ```
    pub fn from_url(url: &str) -> Result<Self> {
        let scheme = url.split_once(':').map_or(url, |(scheme, _)| scheme);

        match scheme.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(ScaffoldError::UnsupportedDatabase(scheme.to_string())),
        }
    }
}

#[derive(Debug)]
enum CatalogPool {
    MySql(MySqlPool),
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

/// Catalog backed by a live database connection
///
/// Owns a private current-thread runtime so the scaffolding pipeline stays
/// synchronous.
#[derive(Debug)]
pub struct SqlCatalog {
    pool: CatalogPool,
    runtime: Runtime,
}

impl SqlCatalog {
    /// Prepare a lazily-connecting catalog for `url`
    ///
    /// No connection is made until the first [`Catalog::columns`] call.
    pub fn connect_lazy(url: &str) -> Result<Self> {
        let backend = DatabaseBackend::from_url(url)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ScaffoldError::Runtime)?;

        let pool = {
            let _guard = runtime.enter();
            match backend {
                DatabaseBackend::MySql => {
                    // mariadb:// is accepted by the CLI but not by the driver
                    let url = url
                        .strip_prefix("mariadb:")
                        .map_or_else(|| url.to_string(), |rest| format!("mysql:{rest}"));
                    CatalogPool::MySql(MySqlPoolOptions::new().max_connections(1).connect_lazy(&url)?)
                }
                DatabaseBackend::Postgres => {
                    CatalogPool::Postgres(PgPoolOptions::new().max_connections(1).connect_lazy(url)?)
                }
                DatabaseBackend::Sqlite => {
                    CatalogPool::Sqlite(SqlitePoolOptions::new().max_connections(1).connect_lazy(url)?)
                }
            }
        };

        tracing::debug!(?backend, "catalog prepared");
        Ok(Self { pool, runtime })
    }

    async fn fetch(&self, table: &str) -> Result<Vec<ColumnRow>> {
        let rows = match &self.pool {
            CatalogPool::MySql(pool) => {
                sqlx::query_as::<_, ColumnRow>(MYSQL_COLUMNS)
                    .bind(table)
                    .fetch_all(pool)
                    .await?
            }
            CatalogPool::Postgres(pool) => {
                sqlx::query_as::<_, ColumnRow>(POSTGRES_COLUMNS)
                    .bind(table)
                    .fetch_all(pool)
                    .await?
            }
            CatalogPool::Sqlite(pool) => {
                sqlx::query_as::<_, ColumnRow>(SQLITE_COLUMNS)
                    .bind(table)
                    .fetch_all(pool)
                    .await?
            }
        };

        Ok(rows)
    }
}

impl Catalog for SqlCatalog {
    #[tracing::instrument(skip(self))]
    fn columns(&self, table: &str) -> Result<Vec<CatalogColumn>> {
        let rows = self.runtime.block_on(self.fetch(table))?;
        tracing::debug!(count = rows.len(), "catalog columns fetched");

        Ok(rows.into_iter().map(CatalogColumn::from).collect())
    }
}

/// In-memory catalog
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tables: HashMap<String, Vec<CatalogColumn>>,
}

impl StaticCatalog {
    /// Empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the columns of `table`
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>, columns: Vec<CatalogColumn>) -> Self {
        self.tables.insert(table.into(), columns);
        self
    }
}

impl Catalog for StaticCatalog {
    fn columns(&self, table: &str) -> Result<Vec<CatalogColumn>> {
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }
}
