use tracing::{debug, error, instrument};

use super::RecordService;
use crate::domain::{Product, ProductDraft};
use crate::entity::RecordEntity;
use crate::error::Degraded;
use crate::product::ProductError;
use crate::record_store::{RecordId, SortType, ID_FIELD};

/// Catalog access.
#[derive(Clone)]
pub struct ProductService {
    inner: RecordService<Product>,
}

impl_record_service!(ProductService, Product, ProductError);

impl ProductService {
    /// Newest first, one page. Empty on any failure.
    pub async fn get_all(&self) -> Vec<Product> {
        self.try_get_all().await.unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub async fn try_get_all(&self) -> Result<Vec<Product>, Degraded> {
        debug!("Sending request");
        let query = Product::query()
            .order_by(ID_FIELD, SortType::Desc)
            .page(self.inner.page_size(), 0);
        self.inner.list(query).await
    }

    /// Exact category match, by name. Empty on any failure.
    pub async fn get_by_category(&self, category: &str) -> Vec<Product> {
        self.try_get_by_category(category).await.unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub async fn try_get_by_category(&self, category: &str) -> Result<Vec<Product>, Degraded> {
        debug!("Sending request");
        let query = Product::query()
            .filter_eq("category_c", category)
            .order_by("name_c", SortType::Asc);
        self.inner.search(query).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(draft).await.map_err(|e| {
            error!(error = %e, "Error creating product");
            ProductError::CreateFailed
        })
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: RecordId, draft: &ProductDraft) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, draft).await.map_err(|e| {
            error!(error = %e, "Error updating product");
            ProductError::UpdateFailed
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::mock_framework::*;
    use crate::notify::{drain, NoticeLevel};
    use crate::record_store::{FieldError, RecordResult, SortType, StoreResponse};

    use super::*;

    fn product_row(id: i64, name: &str, category: &str) -> serde_json::Value {
        json!({
            "Id": id,
            "name_c": name,
            "price_c": 19.5,
            "description_c": "",
            "category_c": category,
            "imageUrl_c": "",
            "in_stock_c": true
        })
    }

    #[tokio::test]
    async fn test_get_all_orders_by_id_desc_and_drops_unmappable_rows() {
        let (services, mut receiver, _) = create_mock_services(10);

        let task = tokio::spawn(async move { services.products.get_all().await });

        let (table, query, responder) = expect_fetch(&mut receiver).await.expect("Expected Fetch request");
        assert_eq!(table, "product_c");
        assert_eq!(query.order_by[0].field_name, "Id");
        assert_eq!(query.order_by[0].sorttype, SortType::Desc);
        assert_eq!(query.paging.map(|p| p.limit), Some(100));
        responder
            .send(StoreResponse::with_data(json!([
                product_row(2, "Lamp", "Home"),
                {"Id": 1, "category_c": "Home"}
            ])))
            .unwrap();

        let products = task.await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Lamp");
    }

    #[tokio::test]
    async fn test_get_all_degrades_to_empty_and_notifies() {
        let (services, mut receiver, mut notices) = create_mock_services(10);

        let task = tokio::spawn(async move { services.products.try_get_all().await });

        let (_, _, responder) = expect_fetch(&mut receiver).await.unwrap();
        responder.send(StoreResponse::failure("Table not accessible")).unwrap();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(Degraded::Rejected(ref m)) if m == "Table not accessible"));
        let notices = drain(&mut notices);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_get_by_category_filters_server_side() {
        let (services, mut receiver, _) = create_mock_services(10);

        let task = tokio::spawn(async move { services.products.get_by_category("Electronics").await });

        let (_, query, responder) = expect_fetch(&mut receiver).await.unwrap();
        assert_eq!(query.filters[0].field_name, "category_c");
        assert_eq!(query.filters[0].values, vec![json!("Electronics")]);
        assert_eq!(query.order_by[0].field_name, "name_c");
        assert_eq!(query.order_by[0].sorttype, SortType::Asc);
        responder
            .send(StoreResponse::with_data(json!([product_row(4, "Headphones", "Electronics")])))
            .unwrap();

        let products = task.await.unwrap();
        assert!(products.iter().all(|p| p.category == "Electronics"));
    }

    #[tokio::test]
    async fn test_get_by_id_hides_underlying_failure() {
        let (services, mut receiver, _) = create_mock_services(10);

        let task = tokio::spawn(async move { services.products.get_by_id(9).await });

        let (table, id, responder) = expect_get(&mut receiver).await.unwrap();
        assert_eq!((table.as_str(), id), ("product_c", 9));
        responder.send(StoreResponse::failure("Record 9 not found in product_c")).unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Product not found");
    }

    #[tokio::test]
    async fn test_create_without_successes_fails_and_toasts_each_error() {
        let (services, mut receiver, mut notices) = create_mock_services(10);

        let task = tokio::spawn(async move {
            let draft = ProductDraft::new("", 12.0, "Home");
            services.products.create(&draft).await
        });

        let (_, payload, responder) = expect_create(&mut receiver).await.unwrap();
        assert_eq!(payload.records.len(), 1);
        assert!(payload.records[0].get("Id").is_none());
        let field_error = FieldError {
            field_label: "Name".to_string(),
            message: "is required".to_string(),
        };
        responder
            .send(StoreResponse::with_results(vec![RecordResult::failed(
                "Validation failed",
                vec![field_error],
            )]))
            .unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Failed to create product");

        let messages: Vec<String> = drain(&mut notices).into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["Name: is required", "Validation failed"]);
    }

    #[tokio::test]
    async fn test_update_sends_id_with_record() {
        let (services, mut receiver, _) = create_mock_services(10);

        let task = tokio::spawn(async move {
            let draft = ProductDraft::new("Lamp", 30.0, "Home");
            services.products.update(2, &draft).await
        });

        let (_, payload, responder) = expect_update(&mut receiver).await.unwrap();
        assert_eq!(payload.records[0]["Id"], json!(2));
        assert_eq!(payload.records[0]["price_c"], json!(30.0));
        responder
            .send(StoreResponse::with_results(vec![RecordResult::succeeded(Some(product_row(
                2, "Lamp", "Home",
            )))]))
            .unwrap();

        let product = task.await.unwrap().unwrap();
        assert_eq!(product.id, 2);
    }

    #[tokio::test]
    async fn test_delete_rejected_returns_false() {
        let (services, mut receiver, _) = create_mock_services(10);

        let task = tokio::spawn(async move { services.products.delete(3).await });

        let (_, payload, responder) = expect_delete(&mut receiver).await.unwrap();
        assert_eq!(payload.record_ids, vec![3]);
        responder.send(StoreResponse::failure("Not allowed")).unwrap();

        assert!(!task.await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_failed_record_is_false_and_notified() {
        let (services, mut receiver, mut notices) = create_mock_services(10);

        let task = tokio::spawn(async move { services.products.delete(3).await });

        let (_, _, responder) = expect_delete(&mut receiver).await.unwrap();
        responder
            .send(StoreResponse::with_results(vec![RecordResult::failed(
                "Record 3 not found",
                Vec::new(),
            )]))
            .unwrap();

        assert!(!task.await.unwrap());
        assert_eq!(drain(&mut notices)[0].message, "Record 3 not found");
    }

    #[tokio::test]
    async fn test_create_mixed_batch_returns_first_success_and_toasts_failures() {
        let (services, mut receiver, mut notices) = create_mock_services(10);

        let task = tokio::spawn(async move {
            let draft = ProductDraft::new("Lamp", 30.0, "Home");
            services.products.create(&draft).await
        });

        let (_, _, responder) = expect_create(&mut receiver).await.unwrap();
        let field_error = FieldError {
            field_label: "Price".to_string(),
            message: "must be positive".to_string(),
        };
        responder
            .send(StoreResponse::with_results(vec![
                RecordResult::failed("Validation failed", vec![field_error]),
                RecordResult::succeeded(Some(product_row(12, "Lamp", "Home"))),
                RecordResult::failed("Duplicate record", Vec::new()),
            ]))
            .unwrap();

        let product = task.await.unwrap().unwrap();
        assert_eq!(product.id, 12);

        let messages: Vec<String> = drain(&mut notices).into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["Price: must be positive", "Validation failed", "Duplicate record"]);
    }

    #[tokio::test]
    async fn test_update_mixed_batch_returns_success() {
        let (services, mut receiver, mut notices) = create_mock_services(10);

        let task = tokio::spawn(async move {
            let draft = ProductDraft::new("Lamp", 31.0, "Home");
            services.products.update(12, &draft).await
        });

        let (_, _, responder) = expect_update(&mut receiver).await.unwrap();
        responder
            .send(StoreResponse::with_results(vec![
                RecordResult::succeeded(Some(product_row(12, "Lamp", "Home"))),
                RecordResult::failed("Record 13 not found", Vec::new()),
            ]))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap().id, 12);
        assert_eq!(drain(&mut notices)[0].message, "Record 13 not found");
    }

    #[tokio::test]
    async fn test_create_rejected_envelope_fails_and_notifies() {
        let (services, mut receiver, mut notices) = create_mock_services(10);

        let task = tokio::spawn(async move {
            let draft = ProductDraft::new("Lamp", 30.0, "Home");
            services.products.create(&draft).await
        });

        let (_, _, responder) = expect_create(&mut receiver).await.unwrap();
        responder.send(StoreResponse::failure("Quota exceeded")).unwrap();

        assert_eq!(task.await.unwrap().unwrap_err(), ProductError::CreateFailed);
        let notices = drain(&mut notices);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Quota exceeded");
    }

    #[tokio::test]
    async fn test_update_rejected_envelope_fails_and_notifies() {
        let (services, mut receiver, mut notices) = create_mock_services(10);

        let task = tokio::spawn(async move {
            let draft = ProductDraft::new("Lamp", 30.0, "Home");
            services.products.update(12, &draft).await
        });

        let (_, _, responder) = expect_update(&mut receiver).await.unwrap();
        responder.send(StoreResponse::failure("Table is read-only")).unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Failed to update product");
        assert_eq!(drain(&mut notices)[0].message, "Table is read-only");
    }
}
