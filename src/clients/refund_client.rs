use reqwest::Method;
use tracing::{info, instrument};

use crate::domain::{total_amount, CashierDateRange, Id, Listing, Refund, RefundCreate};
use crate::error::ActionError;
use crate::request_framework::{LogSummary, Operation, Resource, ResourceClient};

impl Resource for Refund {
    type Id = Id;
    type Create = RefundCreate;

    const NAME: &'static str = "refund";
    const LABEL: &'static str = "Refund";
    const COLLECTION: &'static str = "/api/refunds";
}

impl LogSummary for Refund {
    fn log_success(&self, action: &str) {
        info!(
            refund_id = self.id(),
            order_id = self.order_id(),
            amount = self.amount(),
            reason = self.reason(),
            "{} succeeded",
            action
        );
    }
}

impl LogSummary for Listing<Refund> {
    fn log_success(&self, action: &str) {
        info!(
            refund_count = self.len(),
            total_amount = total_amount(&self.items()),
            "{} succeeded",
            action
        );
    }
}

/// Client for the refund endpoints.
#[derive(Clone)]
pub struct RefundClient {
    inner: ResourceClient<Refund>,
}

impl_resource_client!(RefundClient, Refund, refund);

impl RefundClient {
    #[instrument(skip(self))]
    pub async fn get_all_refunds(&self) -> Result<Listing<Refund>, ActionError> {
        self.inner.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_refunds_by_cashier(&self, cashier_id: Id) -> Result<Listing<Refund>, ActionError> {
        self.query(
            "getByCashier",
            format!("/api/refunds/cashier/{cashier_id}"),
            "Failed to fetch refunds by cashier",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_refunds_by_branch(&self, branch_id: Id) -> Result<Listing<Refund>, ActionError> {
        self.query(
            "getByBranch",
            format!("/api/refunds/branch/{branch_id}"),
            "Failed to fetch refunds by branch",
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_refunds_by_shift(&self, shift_report_id: Id) -> Result<Listing<Refund>, ActionError> {
        self.query(
            "getByShift",
            format!("/api/refunds/shift/{shift_report_id}"),
            "Failed to fetch refunds by shift",
        )
        .await
    }

    /// `from` and `to` are percent-encoded; nothing else about them is
    /// interpreted here.
    #[instrument(skip(self), fields(cashier_id = range.cashier_id, from = %range.from, to = %range.to))]
    pub async fn get_refunds_by_cashier_and_date_range(
        &self,
        range: &CashierDateRange,
    ) -> Result<Listing<Refund>, ActionError> {
        self.query(
            "getByCashierAndDateRange",
            format!(
                "/api/refunds/cashier/{}/range?from={}&to={}",
                range.cashier_id,
                urlencoding::encode(&range.from),
                urlencoding::encode(&range.to)
            ),
            "Failed to fetch refunds by cashier and date range",
        )
        .await
    }

    async fn query(&self, op: &str, path: String, fallback: &str) -> Result<Listing<Refund>, ActionError> {
        let op = Operation::new(ResourceClient::<Refund>::action(op), Method::GET, path, fallback);
        self.inner.api().execute(op, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::{expect_request, mock_api, reply};
    use serde_json::json;

    #[tokio::test]
    async fn listing_endpoints_use_their_paths_and_fallbacks() {
        let cases: Vec<(&str, &str, &str)> = vec![
            ("cashier", "/api/refunds/cashier/5", "Failed to fetch refunds by cashier"),
            ("branch", "/api/refunds/branch/5", "Failed to fetch refunds by branch"),
            ("shift", "/api/refunds/shift/5", "Failed to fetch refunds by shift"),
            ("all", "/api/refunds", "Failed to fetch refunds"),
        ];

        for (kind, path, fallback) in cases {
            let (api, mut rx) = mock_api(Some("tok"), 4);
            let refunds = RefundClient::new(api);

            let task = tokio::spawn(async move {
                match kind {
                    "cashier" => refunds.get_refunds_by_cashier(5).await,
                    "branch" => refunds.get_refunds_by_branch(5).await,
                    "shift" => refunds.get_refunds_by_shift(5).await,
                    _ => refunds.get_all_refunds().await,
                }
            });

            let (request, responder) = expect_request(&mut rx).await.expect("Expected a request");
            assert_eq!(request.method, Method::GET);
            assert_eq!(request.path, path);
            reply(responder, 500, serde_json::Value::Null);

            let err = task.await.unwrap().unwrap_err();
            assert_eq!(err.message(), fallback, "fallback for {kind}");
        }
    }

    #[tokio::test]
    async fn reserved_characters_in_range_are_encoded() {
        let (api, mut rx) = mock_api(Some("tok"), 4);
        let refunds = RefundClient::new(api);

        let task = tokio::spawn(async move {
            let range = CashierDateRange::new(5, "2024-01-01T00:00:00+02:00", "2024/01/31");
            refunds.get_refunds_by_cashier_and_date_range(&range).await
        });

        let (request, responder) = expect_request(&mut rx).await.unwrap();
        assert_eq!(
            request.path,
            "/api/refunds/cashier/5/range?from=2024-01-01T00%3A00%3A00%2B02%3A00&to=2024%2F01%2F31"
        );
        reply(responder, 200, json!([]));

        assert!(task.await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_refund_returns_created_record() {
        let (api, mut rx) = mock_api(Some("tok"), 4);
        let refunds = RefundClient::new(api);

        let task = tokio::spawn(async move {
            refunds.create_refund(&RefundCreate::new(12, 3.5, "damaged")).await
        });

        let (request, responder) = expect_request(&mut rx).await.unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/api/refunds");
        assert_eq!(
            request.body,
            Some(json!({ "orderId": 12, "amount": 3.5, "reason": "damaged" }))
        );
        reply(
            responder,
            201,
            json!({ "id": 40, "orderId": 12, "amount": 3.5, "reason": "damaged", "createdAt": "2024-02-01T09:00:00Z" }),
        );

        let refund = task.await.unwrap().unwrap();
        assert_eq!(refund.id(), Some(40));
        assert_eq!(refund.created_at(), Some("2024-02-01T09:00:00Z"));
    }

    #[tokio::test]
    async fn get_refund_by_id_not_found() {
        let (api, mut rx) = mock_api(Some("tok"), 4);
        let refunds = RefundClient::new(api);

        let task = tokio::spawn(async move { refunds.get_refund_by_id(77).await });

        let (request, responder) = expect_request(&mut rx).await.unwrap();
        assert_eq!(request.path, "/api/refunds/77");
        reply(responder, 404, serde_json::Value::Null);

        assert_eq!(task.await.unwrap().unwrap_err().message(), "Refund not found");
    }

    #[tokio::test]
    async fn empty_created_body_resolves_to_null() {
        let (api, mut rx) = mock_api(Some("tok"), 4);
        let refunds = RefundClient::new(api);

        let task = tokio::spawn(async move {
            refunds.create_refund(&RefundCreate::new(12, 3.5, "damaged")).await
        });

        let (_, responder) = expect_request(&mut rx).await.unwrap();
        reply(responder, 201, serde_json::Value::Null);

        let refund = task.await.unwrap().expect("empty 201 must not fail the call");
        assert_eq!(refund.as_value(), &serde_json::Value::Null);
        assert_eq!(refund.id(), None);
    }
}
