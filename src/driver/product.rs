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

//! Operations on one product.

use crate::db::{self, Db};
use crate::driver::{Driver, DriverResult};
use crate::model::{NewProduct, Product, ProductId, ProductUpdate};

impl Driver {
    /// Creates a new product.  The store assigns its id and defaults its availability.
    pub(crate) async fn create_product(self, new: NewProduct) -> DriverResult<Product> {
        let product = db::create_product(&mut self.db.ex().await?, &new).await?;
        Ok(product)
    }

    /// Gets the current state of the product identified by `id`.
    pub(crate) async fn get_product(self, id: ProductId) -> DriverResult<Product> {
        let product = db::get_product(&mut self.db.ex().await?, id).await?;
        Ok(product)
    }

    /// Replaces every mutable field of the product identified by `id`.
    pub(crate) async fn update_product(
        self,
        id: ProductId,
        update: ProductUpdate,
    ) -> DriverResult<Product> {
        db::update_product(&mut self.db.ex().await?, id, &update).await?;
        Ok(Product::new(id, update.name().clone(), *update.price(), *update.availability()))
    }

    /// Flips the availability flag of the product identified by `id`.
    pub(crate) async fn toggle_availability(self, id: ProductId) -> DriverResult<Product> {
        let mut tx = self.db.begin().await?;
        let product = db::get_product(tx.ex(), id).await?;
        let availability = !*product.availability();
        db::set_availability(tx.ex(), id, availability).await?;
        tx.commit().await?;
        Ok(Product::new(id, product.name().clone(), *product.price(), availability))
    }

    /// Deletes the product identified by `id`, returning its last known state.
    pub(crate) async fn delete_product(self, id: ProductId) -> DriverResult<Product> {
        let mut tx = self.db.begin().await?;
        let product = db::get_product(tx.ex(), id).await?;
        db::delete_product(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(product)
    }
}
