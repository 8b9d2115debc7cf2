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

//! Test utilities for the business layer.

use crate::db::{sqlite, Db, Executor};
use crate::driver::Driver;
use std::sync::Arc;

/// State of a running test against an in-memory database.
pub(crate) struct TestContext {
    /// The database that both the driver and the tests access.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver against an empty in-memory database.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::from(sqlite::testutils::setup().await);
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Returns a pool-backed executor for direct database access.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns a driver clone to run one operation against.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }
}
