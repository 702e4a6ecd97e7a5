//! End-to-end lifecycle tests over the public API: in-memory repository,
//! stubbed settlement gateway, both services wired the way `main` wires
//! them.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use ted_api::gateway::state::AppState;
use ted_api::settlement::{SettlementBatch, SettlementError, SettlementGateway};
use ted_api::ted::{
    AdminTedQuery, ClientTedQuery, InMemoryTedRepository, SubmitTedRequest, TedError, TedLimit,
    TedStatus, today,
};
use ted_api::{HttpSettlementGateway, SettlementConfig};

/// Counting stub gateway with a fixed confirmation id.
struct StubGateway {
    confirmation: &'static str,
    calls: AtomicUsize,
}

impl StubGateway {
    fn new(confirmation: &'static str) -> Arc<Self> {
        Arc::new(StubGateway {
            confirmation,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SettlementGateway for StubGateway {
    async fn submit(&self, _batch: SettlementBatch) -> Result<String, SettlementError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.confirmation.to_string())
    }
}

/// Gateway that always reports an upstream business rejection.
struct RejectingGateway;

#[async_trait]
impl SettlementGateway for RejectingGateway {
    async fn submit(&self, _batch: SettlementBatch) -> Result<String, SettlementError> {
        Err(SettlementError::Rejected(vec![
            "Conta corrente inexistente".to_string(),
        ]))
    }
}

fn settlement_config(start: &str, end: &str) -> SettlementConfig {
    SettlementConfig {
        base_url: "http://localhost:9".to_string(),
        client_id: "test".to_string(),
        client_secret: "secret".to_string(),
        window_start: start.parse().unwrap(),
        window_end: end.parse().unwrap(),
        is_local: true,
    }
}

fn policy(max_day: &str, max_count: i32, max_single: &str) -> TedLimit {
    TedLimit {
        max_value_per_day: max_day.parse().unwrap(),
        max_count_per_day: max_count,
        max_value_per_single: max_single.parse().unwrap(),
    }
}

fn request(client_id: i32, value: &str, scheduled: NaiveDateTime) -> SubmitTedRequest {
    SubmitTedRequest {
        client_id,
        client_name: format!("Client {}", client_id),
        scheduling_date: scheduled,
        requested_value: value.parse().unwrap(),
        agency_number: "1234".to_string(),
        account_number: "56789".to_string(),
        account_digit: "0".to_string(),
        bank_number: "341".to_string(),
        bank_name: "Banco Itau".to_string(),
    }
}

fn noon_today() -> NaiveDateTime {
    today().and_hms_opt(12, 0, 0).unwrap()
}

/// AppState wired like `main`, with an always-open window.
fn open_state(limit: TedLimit, gateway: Arc<dyn SettlementGateway>) -> AppState {
    let repo = Arc::new(InMemoryTedRepository::with_limit(limit));
    AppState::new(repo, gateway, &settlement_config("00:00:00", "23:59:59"))
}

#[tokio::test]
async fn submission_in_window_under_limits_is_approved() {
    let state = open_state(policy("10000", 3, "5000"), StubGateway::new("742"));

    let ted = state
        .client
        .submit(request(1, "1500", noon_today()))
        .await
        .unwrap();

    assert_eq!(ted.status, TedStatus::Approved);
    assert_eq!(ted.confirmation_id.as_deref(), Some("742"));
    assert!(ted.id > 0);
}

#[tokio::test]
async fn submission_round_trip_preserves_fields() {
    let state = open_state(policy("10000", 3, "5000"), StubGateway::new("742"));

    let req = request(7, "123.45", noon_today());
    let ted = state.client.submit(req.clone()).await.unwrap();

    let page = state
        .client
        .list(7, &ClientTedQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 1);

    let stored = &page.items[0];
    assert_eq!(stored.id, ted.id);
    assert_eq!(stored.client_name, req.client_name);
    assert_eq!(stored.scheduling_date, req.scheduling_date);
    assert_eq!(stored.requested_value, req.requested_value);
    assert_eq!(stored.agency_number, req.agency_number);
    assert_eq!(stored.account_number, req.account_number);
    assert_eq!(stored.account_digit, req.account_digit);
    assert_eq!(stored.bank_number, req.bank_number);
    assert_eq!(stored.bank_name, req.bank_name);
}

#[tokio::test]
async fn fourth_submission_hits_count_cap_and_stays_pending() {
    let gateway = StubGateway::new("742");
    let state = open_state(policy("10000", 3, "5000"), gateway.clone());

    for _ in 0..3 {
        let ted = state
            .client
            .submit(request(1, "10", noon_today()))
            .await
            .unwrap();
        assert_eq!(ted.status, TedStatus::Approved);
    }

    // Not an error: the fourth request parks in process.
    let fourth = state
        .client
        .submit(request(1, "10", noon_today()))
        .await
        .unwrap();
    assert_eq!(fourth.status, TedStatus::InProcess);
    assert!(fourth.confirmation_id.is_none());
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn daily_value_cap_counts_all_statuses() {
    let gateway = StubGateway::new("742");
    let state = open_state(policy("1000", 10, "1000"), gateway.clone());

    let first = state
        .client
        .submit(request(1, "600", noon_today()))
        .await
        .unwrap();
    state.client.cancel(first.id).await.unwrap();

    // The canceled 600 still occupies the day's budget: 600 + 500 > 1000.
    let second = state
        .client
        .submit(request(1, "500", noon_today()))
        .await
        .unwrap();
    assert_eq!(second.status, TedStatus::InProcess);
}

#[tokio::test]
async fn limits_are_scoped_per_client() {
    let state = open_state(policy("10000", 1, "5000"), StubGateway::new("742"));

    let a = state
        .client
        .submit(request(1, "10", noon_today()))
        .await
        .unwrap();
    let b = state
        .client
        .submit(request(2, "10", noon_today()))
        .await
        .unwrap();

    // Client 1 used up their single daily slot; client 2 did not.
    assert_eq!(a.status, TedStatus::Approved);
    assert_eq!(b.status, TedStatus::Approved);

    let third = state
        .client
        .submit(request(1, "10", noon_today()))
        .await
        .unwrap();
    assert_eq!(third.status, TedStatus::InProcess);
}

#[tokio::test]
async fn submission_outside_window_stays_pending() {
    let repo = Arc::new(InMemoryTedRepository::with_limit(policy("10000", 3, "5000")));
    let gateway = StubGateway::new("742");
    let state = AppState::new(
        repo,
        gateway.clone(),
        &settlement_config("01:00:00", "01:00:01"),
    );

    let ted = state
        .client
        .submit(request(1, "10", noon_today()))
        .await
        .unwrap();

    assert_eq!(ted.status, TedStatus::InProcess);
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);

    // An administrator can still approve it later.
    state.admin.approve(ted.id).await.unwrap();
    let approved = state.admin.find(ted.id).await.unwrap().unwrap();
    assert_eq!(approved.status, TedStatus::Approved);
    assert_eq!(approved.confirmation_id.as_deref(), Some("742"));
}

#[tokio::test]
async fn past_scheduling_date_fails_before_admission() {
    let gateway = StubGateway::new("742");
    let state = open_state(policy("10000", 3, "5000"), gateway.clone());

    let yesterday = (today() - chrono::Duration::days(1))
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let err = state
        .client
        .submit(request(1, "10", yesterday))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);

    let page = state
        .client
        .list(1, &ClientTedQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 0);
}

#[tokio::test]
async fn settlement_rejection_fails_submission_with_upstream_messages() {
    let state = open_state(policy("10000", 3, "5000"), Arc::new(RejectingGateway));

    let err = state
        .client
        .submit(request(1, "10", noon_today()))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(
        err.messages(),
        vec!["Conta corrente inexistente".to_string()]
    );
}

#[tokio::test]
async fn double_approve_fails_second_time() {
    let repo = Arc::new(InMemoryTedRepository::with_limit(policy("10000", 3, "5000")));
    let state = AppState::new(
        repo,
        StubGateway::new("742"),
        &settlement_config("01:00:00", "01:00:01"),
    );

    let ted = state
        .client
        .submit(request(1, "10", noon_today()))
        .await
        .unwrap();

    state.admin.approve(ted.id).await.unwrap();
    let err = state.admin.approve(ted.id).await.unwrap_err();
    assert!(matches!(err, TedError::AlreadyApproved));
}

#[tokio::test]
async fn reject_and_cancel_mirror_approve_guards() {
    // Closed window so every submission parks in process.
    let state = AppState::new(
        Arc::new(InMemoryTedRepository::with_limit(policy("10000", 5, "5000"))),
        StubGateway::new("742"),
        &settlement_config("01:00:00", "01:00:01"),
    );

    let first = state
        .client
        .submit(request(1, "10", noon_today()))
        .await
        .unwrap();
    let second = state
        .client
        .submit(request(1, "10", noon_today()))
        .await
        .unwrap();

    // Reject: second rejection fails, and a rejected TED cannot be
    // approved or canceled.
    state.admin.reject(first.id, Some("manual review")).await.unwrap();
    assert!(matches!(
        state.admin.reject(first.id, None).await.unwrap_err(),
        TedError::AlreadyDisapproved
    ));
    assert!(matches!(
        state.admin.approve(first.id).await.unwrap_err(),
        TedError::CannotApprove
    ));
    assert!(matches!(
        state.client.cancel(first.id).await.unwrap_err(),
        TedError::CannotCancel
    ));

    // Cancel: second cancellation fails, and a canceled TED cannot be
    // rejected.
    state.client.cancel(second.id).await.unwrap();
    assert!(matches!(
        state.client.cancel(second.id).await.unwrap_err(),
        TedError::AlreadyCanceled
    ));
    assert!(matches!(
        state.admin.reject(second.id, None).await.unwrap_err(),
        TedError::CannotDisapprove
    ));
}

#[tokio::test]
async fn lifecycle_actions_on_unknown_id_are_not_found() {
    let state = open_state(policy("10000", 3, "5000"), StubGateway::new("742"));

    assert!(matches!(
        state.admin.approve(404).await.unwrap_err(),
        TedError::NotFound
    ));
    assert!(matches!(
        state.admin.reject(404, None).await.unwrap_err(),
        TedError::NotFound
    ));
    assert!(matches!(
        state.client.cancel(404).await.unwrap_err(),
        TedError::NotFound
    ));
}

#[tokio::test]
async fn admin_listing_with_out_of_range_dates_is_empty() {
    let state = open_state(policy("10000", 3, "5000"), StubGateway::new("742"));
    state
        .client
        .submit(request(1, "10", noon_today()))
        .await
        .unwrap();

    let query = AdminTedQuery {
        data_inicio: Some("2000-01-01".parse().unwrap()),
        data_fim: Some("2000-01-31".parse().unwrap()),
        ..AdminTedQuery::default()
    };
    let page = state.admin.list(&query).await.unwrap();
    assert_eq!(page.total_items, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn pagination_invariants_hold() {
    let state = open_state(policy("100000", 100, "5000"), StubGateway::new("742"));
    for _ in 0..7 {
        state
            .client
            .submit(request(1, "10", noon_today()))
            .await
            .unwrap();
    }

    let page_size = 3i64;
    let mut seen = 0i64;
    for page_number in 1..=3 {
        let query = ClientTedQuery {
            numero_pagina: page_number,
            quantidade_itens_pagina: page_size,
            ..ClientTedQuery::default()
        };
        let page = state.client.list(1, &query).await.unwrap();
        assert_eq!(page.total_items, 7);

        let expected = (page.total_items - (page_number - 1) * page_size)
            .clamp(0, page_size);
        assert_eq!(page.items.len() as i64, expected);
        seen += page.items.len() as i64;
    }
    assert_eq!(seen, 7);
}

#[tokio::test]
async fn status_filter_matches_exactly() {
    let state = open_state(policy("10000", 10, "5000"), StubGateway::new("742"));

    let approved = state
        .client
        .submit(request(1, "10", noon_today()))
        .await
        .unwrap();
    assert_eq!(approved.status, TedStatus::Approved);

    // Parks in process (over single cap).
    state
        .client
        .submit(request(1, "9000", noon_today()))
        .await
        .unwrap();

    let query = ClientTedQuery {
        status: Some(TedStatus::Approved.id()),
        ..ClientTedQuery::default()
    };
    let page = state.client.list(1, &query).await.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].status, TedStatus::Approved);
}

#[tokio::test]
async fn limit_policy_update_takes_effect_immediately() {
    let state = open_state(policy("10000", 3, "5000"), StubGateway::new("742"));

    let current = state.admin.limit().await.unwrap();
    assert_eq!(current.max_count_per_day, 3);

    state
        .admin
        .update_limit(&policy("10000", 3, "100"))
        .await
        .unwrap();

    // 200 was admissible before the update, not after.
    let ted = state
        .client
        .submit(request(1, "200", noon_today()))
        .await
        .unwrap();
    assert_eq!(ted.status, TedStatus::InProcess);
}

#[tokio::test]
async fn local_gateway_produces_three_digit_confirmations() {
    let repo = Arc::new(InMemoryTedRepository::with_limit(policy("100000", 100, "5000")));
    let gateway = Arc::new(
        HttpSettlementGateway::new(settlement_config("00:00:00", "23:59:59")).unwrap(),
    );
    let state = AppState::new(repo, gateway, &settlement_config("00:00:00", "23:59:59"));

    for _ in 0..5 {
        let ted = state
            .client
            .submit(request(1, "10", noon_today()))
            .await
            .unwrap();
        assert_eq!(ted.status, TedStatus::Approved);
        let confirmation: u32 = ted.confirmation_id.unwrap().parse().unwrap();
        assert!((111..=999).contains(&confirmation));
    }
}

#[tokio::test]
async fn example_scenario_from_policy_review() {
    // policy = {maxValuePerDay: 10000, maxCountPerDay: 3, maxValuePerSingle: 5000}
    let gateway = StubGateway::new("321");
    let state = open_state(policy("10000", 3, "5000"), gateway.clone());

    for _ in 0..3 {
        let ted = state
            .client
            .submit(request(9, "10", noon_today()))
            .await
            .unwrap();
        assert_eq!(ted.status, TedStatus::Approved);
        assert!(ted.confirmation_id.is_some());
    }

    let fourth = state
        .client
        .submit(request(9, "10", noon_today()))
        .await
        .unwrap();
    assert_eq!(fourth.status, TedStatus::InProcess);
    assert!(fourth.confirmation_id.is_none());
}
