// Catalog API
// Copyright 2025 The Catalog API Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Database abstraction to manipulate products.
//!
//! The facilities in this module provide an abstraction over different
//! database systems.  The PostgreSQL backend is for production use and the
//! SQLite backend is primarily intended to support unit tests.

use crate::model::{ModelError, NewProduct, Price, Product, ProductId, ProductName, ProductUpdate};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;

pub mod postgres;
pub mod sqlite;

/// Database errors.  Any unexpected errors that come from the database are classified as
/// `BackendError`, but errors we know about have more specific types.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DbError {
    /// Indicates that a request to create an entry failed because it already exists.
    #[error("Already exists")]
    AlreadyExists,

    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates a failure processing the data that already exists in the database.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,

    /// Indicates that the database is not available (maybe because of too many active concurrent
    /// connections).
    #[error("Unavailable")]
    Unavailable,
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;

/// A database executor that can talk to multiple database implementations.
///
/// Users of this type are forced to destructure it and issue different queries for each
/// database, which is needed by sqlx to offer type safety guarantees during query execution.
///
/// Note that this can wrap an executor that talks directly to a pool or to an open transaction.
pub enum Executor {
    /// A PostgreSQL executor.
    Postgres(postgres::PostgresExecutor),

    /// A SQLite executor.
    Sqlite(sqlite::SqliteExecutor),
}

/// A wrapper for a database executor backed by an open transaction.
pub struct TxExecutor(Executor);

impl TxExecutor {
    /// Returns the executor wrapped by this transaction.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    pub fn ex(&mut self) -> &mut Executor {
        &mut self.0
    }

    /// Commits the transaction.
    pub async fn commit(self) -> DbResult<()> {
        match self.0 {
            Executor::Postgres(ex) => ex.commit().await,
            Executor::Sqlite(ex) => ex.commit().await,
        }
    }
}

/// Abstraction over the database connection.
#[async_trait]
pub trait Db {
    /// Obtains an executor for direct access to the pool.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    async fn ex(&self) -> DbResult<Executor>;

    /// Begins a transaction.
    ///
    /// It is the responsibility of the caller to call `commit` on the returned executor.  Otherwise
    /// the transaction is rolled back on drop.
    async fn begin(&self) -> DbResult<TxExecutor>;

    /// Closes the connection pool.
    async fn close(&self);
}

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,
    }
}

impl TryFrom<PgRow> for Product {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let price: f64 = row.try_get("price").map_err(postgres::map_sqlx_error)?;
        let availability: bool = row.try_get("availability").map_err(postgres::map_sqlx_error)?;

        Ok(Product::new(ProductId::new(id), ProductName::new(name)?, Price::new(price)?, availability))
    }
}

impl TryFrom<SqliteRow> for Product {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let price: f64 = row.try_get("price").map_err(sqlite::map_sqlx_error)?;
        let availability: bool = row.try_get("availability").map_err(sqlite::map_sqlx_error)?;

        Ok(Product::new(ProductId::new(id), ProductName::new(name)?, Price::new(price)?, availability))
    }
}

/// Validates that a mutation of a single product touched exactly 1 row.
fn ensure_one_row(affected: u64) -> DbResult<()> {
    match affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError(format!("Mutation affected {} rows", affected))),
    }
}

/// Gets all products, most expensive first.
pub(crate) async fn list_products(ex: &mut Executor) -> DbResult<Vec<Product>> {
    let mut products = Vec::new();
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, price, availability FROM products ORDER BY price DESC";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                products.push(Product::try_from(row)?);
            }
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, name, price, availability FROM products ORDER BY price DESC";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                products.push(Product::try_from(row)?);
            }
        }
    }
    Ok(products)
}

/// Gets the product identified by `id`.
pub(crate) async fn get_product(ex: &mut Executor, id: ProductId) -> DbResult<Product> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, price, availability FROM products WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Product::try_from(row)
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, name, price, availability FROM products WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Product::try_from(row)
        }
    }
}

/// Persists a new product and returns it with its store-assigned id.
///
/// The availability flag and the tracking timestamps take their default values from the schema.
pub(crate) async fn create_product(ex: &mut Executor, new: &NewProduct) -> DbResult<Product> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO products (name, price)
                VALUES ($1, $2)
                RETURNING id, name, price, availability
            ";
            let row = sqlx::query(query_str)
                .bind(new.name().as_str())
                .bind(new.price().value())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Product::try_from(row)
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO products (name, price)
                VALUES (?, ?)
                RETURNING id, name, price, availability
            ";
            let row = sqlx::query(query_str)
                .bind(new.name().as_str())
                .bind(new.price().value())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Product::try_from(row)
        }
    }
}

/// Replaces every mutable field of the product identified by `id`.
pub(crate) async fn update_product(
    ex: &mut Executor,
    id: ProductId,
    update: &ProductUpdate,
) -> DbResult<()> {
    let affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE products
                SET name = $1, price = $2, availability = $3, updated_at = CURRENT_TIMESTAMP
                WHERE id = $4
            ";
            sqlx::query(query_str)
                .bind(update.name().as_str())
                .bind(update.price().value())
                .bind(*update.availability())
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE products
                SET name = ?, price = ?, availability = ?, updated_at = CURRENT_TIMESTAMP
                WHERE id = ?
            ";
            sqlx::query(query_str)
                .bind(update.name().as_str())
                .bind(update.price().value())
                .bind(*update.availability())
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
                .rows_affected()
        }
    };
    ensure_one_row(affected)
}

/// Sets the availability flag of the product identified by `id`.
pub(crate) async fn set_availability(
    ex: &mut Executor,
    id: ProductId,
    availability: bool,
) -> DbResult<()> {
    let affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE products
                SET availability = $1, updated_at = CURRENT_TIMESTAMP
                WHERE id = $2
            ";
            sqlx::query(query_str)
                .bind(availability)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE products
                SET availability = ?, updated_at = CURRENT_TIMESTAMP
                WHERE id = ?
            ";
            sqlx::query(query_str)
                .bind(availability)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
                .rows_affected()
        }
    };
    ensure_one_row(affected)
}

/// Deletes the product identified by `id`.
pub(crate) async fn delete_product(ex: &mut Executor, id: ProductId) -> DbResult<()> {
    let affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM products WHERE id = $1";
            sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM products WHERE id = ?";
            sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
                .rows_affected()
        }
    };
    ensure_one_row(affected)
}
