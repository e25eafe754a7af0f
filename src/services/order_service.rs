use serde_json::Value;
use tracing::{debug, error, instrument};

use super::RecordService;
use crate::domain::{Order, OrderDraft, OrderStatus};
use crate::entity::RecordEntity;
use crate::error::Degraded;
use crate::order::OrderError;
use crate::record_store::{Record, RecordId, SortType};

/// Order history and placement.
#[derive(Clone)]
pub struct OrderService {
    inner: RecordService<Order>,
}

impl_record_service!(OrderService, Order, OrderError);

impl OrderService {
    /// Most recent first, one page. Empty on any failure.
    pub async fn get_all(&self) -> Vec<Order> {
        self.try_get_all().await.unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub async fn try_get_all(&self) -> Result<Vec<Order>, Degraded> {
        debug!("Sending request");
        let query = Order::query()
            .order_by("order_date_c", SortType::Desc)
            .page(self.inner.page_size(), 0);
        self.inner.list(query).await
    }

    /// Places an order. The stored order is dated now and `Confirmed`.
    #[instrument(skip(self, draft), fields(total = draft.total, items = draft.items.len()))]
    pub async fn create(&self, draft: &OrderDraft) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.create(draft).await.map_err(|e| {
            error!(error = %e, "Error creating order");
            OrderError::CreateFailed
        })
    }

    #[instrument(skip(self))]
    pub async fn update_status(&self, id: RecordId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        let mut fields = Record::new();
        fields.insert("status_c".to_string(), Value::String(status.to_string()));
        self.inner.patch(id, fields).await.map_err(|e| {
            error!(error = %e, "Error updating order status");
            OrderError::UpdateStatusFailed
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::{BillingInfo, OrderLineItem, ShippingAddress};
    use crate::mock_framework::*;
    use crate::record_store::{RecordResult, StoreResponse};

    use super::*;

    fn order_row(id: i64, status: &str) -> Value {
        json!({
            "Id": id,
            "order_date_c": "2024-03-09T14:30:00Z",
            "status_c": status,
            "total_c": 24.0,
            "items_c": "[{\"productId\":7,\"name\":\"Mug\",\"price\":12.0,\"quantity\":2}]"
        })
    }

    #[tokio::test]
    async fn test_get_all_newest_first() {
        let (services, mut receiver, _) = create_mock_services(10);

        let task = tokio::spawn(async move { services.orders.get_all().await });

        let (table, query, responder) = expect_fetch(&mut receiver).await.unwrap();
        assert_eq!(table, "order_c");
        assert_eq!(query.order_by[0].field_name, "order_date_c");
        assert_eq!(query.order_by[0].sorttype, SortType::Desc);
        responder
            .send(StoreResponse::with_data(json!([order_row(5, "Shipped")])))
            .unwrap();

        let orders = task.await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status, OrderStatus::Shipped);
        assert_eq!(orders[0].items[0].quantity, 2);
        assert_eq!(orders[0].shipping_address, ShippingAddress::default());
    }

    #[tokio::test]
    async fn test_create_serializes_items_and_stamps_status() {
        let (services, mut receiver, _) = create_mock_services(10);

        let task = tokio::spawn(async move {
            let draft = OrderDraft {
                total: 24.0,
                items: vec![OrderLineItem {
                    product_id: 7,
                    name: "Mug".to_string(),
                    price: 12.0,
                    quantity: 2,
                    image_url: None,
                }],
                shipping_address: ShippingAddress::default(),
                billing_info: BillingInfo {
                    email: "ada@example.com".to_string(),
                    ..BillingInfo::default()
                },
            };
            services.orders.create(&draft).await
        });

        let (table, payload, responder) = expect_create(&mut receiver).await.unwrap();
        assert_eq!(table, "order_c");
        let record = &payload.records[0];
        assert_eq!(record["status_c"], json!("Confirmed"));
        assert_eq!(record["billing_info_email_c"], json!("ada@example.com"));
        let items: Vec<OrderLineItem> = serde_json::from_str(record["items_c"].as_str().unwrap()).unwrap();
        assert_eq!(items[0].product_id, 7);
        responder
            .send(StoreResponse::with_results(vec![RecordResult::succeeded(Some(order_row(
                11,
                "Confirmed",
            )))]))
            .unwrap();

        let order = task.await.unwrap().unwrap();
        assert_eq!(order.id, 11);
    }

    #[tokio::test]
    async fn test_update_status_patches_only_status() {
        let (services, mut receiver, _) = create_mock_services(10);

        let task = tokio::spawn(async move { services.orders.update_status(11, OrderStatus::Shipped).await });

        let (_, payload, responder) = expect_update(&mut receiver).await.unwrap();
        let record = &payload.records[0];
        assert_eq!(record.len(), 2);
        assert_eq!(record["Id"], json!(11));
        assert_eq!(record["status_c"], json!("Shipped"));
        responder
            .send(StoreResponse::with_results(vec![RecordResult::succeeded(Some(order_row(
                11, "Shipped",
            )))]))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap().status, OrderStatus::Shipped);
    }

    #[tokio::test]
    async fn test_update_status_failure_is_generic() {
        let (services, mut receiver, _) = create_mock_services(10);

        let task = tokio::spawn(async move { services.orders.update_status(99, OrderStatus::Cancelled).await });

        let (_, _, responder) = expect_update(&mut receiver).await.unwrap();
        responder
            .send(StoreResponse::with_results(vec![RecordResult::failed(
                "Record 99 not found",
                Vec::new(),
            )]))
            .unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Failed to update order status");
    }
}
