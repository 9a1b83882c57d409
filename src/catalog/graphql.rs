//! GraphQL catalog backend.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{CatalogError, CatalogRepository};
use crate::domain::{
    CreateProductInput, OperationContext, Product, ProductRecord, StockStatus, Unit,
    UpdateProductInput,
};
use crate::filter::{ProductFilter, StatusFilter};
use crate::graphql::operation;

pub use crate::graphql::GraphQlClient;

macro_rules! product_fields {
    () => {
        "id name category price quantity unit status supplier lastUpdated"
    };
}

const GET_PRODUCTS_QUERY: &str = concat!(
    "query GetProducts($filters: ProductFilterInput) { products(filters: $filters) { ",
    product_fields!(),
    " } }"
);

const GET_PRODUCT_QUERY: &str = concat!(
    "query GetProduct($id: ID!) { product(id: $id) { ",
    product_fields!(),
    " } }"
);

const CREATE_PRODUCT_MUTATION: &str = concat!(
    "mutation CreateProduct($input: CreateProductInput!) { createProduct(createProductInput: $input) { ",
    product_fields!(),
    " } }"
);

const UPDATE_PRODUCT_MUTATION: &str = concat!(
    "mutation UpdateProduct($id: ID!, $input: UpdateProductInput!) { updateProduct(id: $id, updateProductInput: $input) { ",
    product_fields!(),
    " } }"
);

const DELETE_PRODUCT_MUTATION: &str =
    "mutation DeleteProduct($id: ID!) { deleteProduct(id: $id) { success } }";

/// `ProductFilterInput` variables.
#[derive(Debug, Serialize)]
struct FilterVariables<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<StockStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

impl<'a> From<&'a ProductFilter> for FilterVariables<'a> {
    fn from(filter: &'a ProductFilter) -> Self {
        let status = match filter.status {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status),
        };
        Self {
            status,
            category: filter.category.as_deref().filter(|c| !c.is_empty()),
            search: filter.search.as_deref().filter(|s| !s.is_empty()),
        }
    }
}

/// `CreateProductInput` variables; GraphQL wants `price` as a Float.
#[derive(Debug, Serialize)]
struct CreateVariables {
    name: String,
    category: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    quantity: u32,
    unit: Unit,
    supplier: String,
}

impl From<CreateProductInput> for CreateVariables {
    fn from(input: CreateProductInput) -> Self {
        Self {
            name: input.name,
            category: input.category,
            price: input.price.value(),
            quantity: input.quantity,
            unit: input.unit,
            supplier: input.supplier,
        }
    }
}

#[derive(Debug, Serialize)]
struct UpdateVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    supplier: Option<String>,
}

impl From<UpdateProductInput> for UpdateVariables {
    fn from(input: UpdateProductInput) -> Self {
        Self {
            name: input.name,
            category: input.category,
            price: input.price.map(|p| p.value()),
            quantity: input.quantity,
            unit: input.unit,
            supplier: input.supplier,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: Vec<ProductRecord>,
}

#[derive(Debug, Deserialize)]
struct ProductData {
    product: Option<ProductRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateData {
    create_product: ProductRecord,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateData {
    update_product: Option<ProductRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteData {
    delete_product: DeleteResult,
}

#[derive(Debug, Deserialize)]
struct DeleteResult {
    success: bool,
}

/// Catalog served by a remote GraphQL inventory API.
#[derive(Debug, Clone)]
pub struct GraphQlCatalog {
    client: GraphQlClient,
}

impl GraphQlCatalog {
    pub fn new(client: GraphQlClient) -> Self {
        Self { client }
    }
}

fn into_product(record: ProductRecord) -> Result<Product, CatalogError> {
    Ok(Product::try_from(record)?)
}

#[async_trait]
impl CatalogRepository for GraphQlCatalog {
    async fn list(
        &self,
        ctx: &OperationContext,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, CatalogError> {
        let body = operation(
            "GetProducts",
            GET_PRODUCTS_QUERY,
            json!({ "filters": FilterVariables::from(filter) }),
        );
        let data: ProductsData = self.client.execute(&body, ctx.access_token.as_deref()).await?;

        tracing::debug!(count = data.products.len(), "Fetched products from backend");

        data.products.into_iter().map(into_product).collect()
    }

    async fn get(&self, ctx: &OperationContext, id: &str) -> Result<Option<Product>, CatalogError> {
        let body = operation("GetProduct", GET_PRODUCT_QUERY, json!({ "id": id }));
        let data: ProductData = self.client.execute(&body, ctx.access_token.as_deref()).await?;

        data.product.map(into_product).transpose()
    }

    async fn create(
        &self,
        ctx: &OperationContext,
        input: CreateProductInput,
    ) -> Result<Product, CatalogError> {
        input.validate()?;

        let body = operation(
            "CreateProduct",
            CREATE_PRODUCT_MUTATION,
            json!({ "input": CreateVariables::from(input) }),
        );
        let data: CreateData = self.client.execute(&body, ctx.access_token.as_deref()).await?;

        into_product(data.create_product)
    }

    async fn update(
        &self,
        ctx: &OperationContext,
        id: &str,
        input: UpdateProductInput,
    ) -> Result<Product, CatalogError> {
        input.require_changes()?;

        let body = operation(
            "UpdateProduct",
            UPDATE_PRODUCT_MUTATION,
            json!({ "id": id, "input": UpdateVariables::from(input) }),
        );
        let data: UpdateData = self.client.execute(&body, ctx.access_token.as_deref()).await?;

        data.update_product
            .map(into_product)
            .transpose()?
            .ok_or_else(|| CatalogError::not_found(id))
    }

    async fn delete(&self, ctx: &OperationContext, id: &str) -> Result<bool, CatalogError> {
        let body = operation("DeleteProduct", DELETE_PRODUCT_MUTATION, json!({ "id": id }));
        let data: DeleteData = self.client.execute(&body, ctx.access_token.as_deref()).await?;

        Ok(data.delete_product.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, Price};
    use rust_decimal_macros::dec;

    #[test]
    fn test_filter_variables_drop_match_all() {
        let filter = ProductFilter::new().with_search("");
        let value = serde_json::to_value(FilterVariables::from(&filter)).unwrap();
        assert_eq!(value, json!({}));

        let filter = ProductFilter::new()
            .with_search("tea")
            .with_status(StockStatus::LowStock);
        let value = serde_json::to_value(FilterVariables::from(&filter)).unwrap();
        assert_eq!(value, json!({ "status": "low-stock", "search": "tea" }));
    }

    #[test]
    fn test_create_variables_send_price_as_float() {
        let input = CreateProductInput {
            name: "Oat Milk".to_string(),
            category: "Beverages".to_string(),
            price: Price::new(dec!(3.25)).unwrap(),
            quantity: 40,
            unit: Unit::Liters,
            supplier: "Oat Co.".to_string(),
        };
        let value = serde_json::to_value(CreateVariables::from(input)).unwrap();
        assert_eq!(value["price"], json!(3.25));
        assert_eq!(value["unit"], "L");
    }

    #[test]
    fn test_update_variables_only_send_changes() {
        let input = UpdateProductInput::default().with_quantity(60);
        let value = serde_json::to_value(UpdateVariables::from(input)).unwrap();
        assert_eq!(value, json!({ "quantity": 60 }));
    }

    #[test]
    fn test_documents_request_every_product_field() {
        for document in [GET_PRODUCTS_QUERY, GET_PRODUCT_QUERY, CREATE_PRODUCT_MUTATION] {
            assert!(document.contains("lastUpdated"));
            assert!(document.contains("status"));
        }
        assert!(UPDATE_PRODUCT_MUTATION.contains("updateProductInput: $input"));
    }

    #[tokio::test]
    async fn test_empty_update_rejected_before_any_request() {
        // Nothing listens on the discard port; reaching the network would
        // surface as a Remote error instead.
        let catalog = GraphQlCatalog::new(GraphQlClient::new("http://127.0.0.1:9/graphql"));
        let result = catalog
            .update(&OperationContext::new(), "1", UpdateProductInput::default())
            .await;
        assert!(matches!(
            result,
            Err(CatalogError::Domain(DomainError::InvalidProduct(ref msg))) if msg == "No changes provided"
        ));
    }

    #[test]
    fn test_products_payload_decodes() {
        let data: ProductsData = serde_json::from_value(json!({
            "products": [{
                "id": "1",
                "name": "Premium Coffee Beans",
                "category": "Beverages",
                "price": 24.99,
                "quantity": 150,
                "unit": "kg",
                "status": "in-stock",
                "supplier": "Global Coffee Co.",
                "lastUpdated": "2024-02-10"
            }]
        }))
        .unwrap();
        let products: Vec<Product> = data
            .products
            .into_iter()
            .map(into_product)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(products[0].price.value(), dec!(24.99));
        assert_eq!(products[0].status(), StockStatus::InStock);
    }
}
