use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use float_cmp::approx_eq;

use cardano_wallet_profiler::{
    aggregate, AggregationError, CompositeEventHandler, PortfolioDataProvider, PortfolioTracker,
    PriceProvider, TokenBook, TokenPosition,
};

/// In-memory positions source; addresses it does not know fail to fetch
struct MemoryProvider {
    wallets: HashMap<String, Vec<TokenPosition>>,
    calls: AtomicUsize,
}

impl MemoryProvider {
    fn new(wallets: Vec<(&str, Vec<TokenPosition>)>) -> Self {
        Self {
            wallets: wallets
                .into_iter()
                .map(|(address, positions)| (address.to_string(), positions))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PortfolioDataProvider for MemoryProvider {
    async fn fetch_positions(&self, address: &str) -> anyhow::Result<Vec<TokenPosition>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.wallets
            .get(address)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("TapTools API error 500 for {}", address))
    }
}

struct NoPrice;

#[async_trait]
impl PriceProvider for NoPrice {
    async fn get_ada_price(&self) -> Option<f64> {
        None
    }
}

fn addresses(list: &[&str]) -> Vec<String> {
    list.iter().map(|a| a.to_string()).collect()
}

fn assert_books_close(left: &TokenBook, right: &TokenBook) {
    assert_eq!(left.keys().collect::<Vec<_>>(), right.keys().collect::<Vec<_>>());
    for token in left.iter() {
        let other = right.get(&token.ticker).unwrap();
        assert!(approx_eq!(f64, token.quantity, other.quantity, epsilon = 1e-9));
        assert!(approx_eq!(f64, token.ada_value, other.ada_value, epsilon = 1e-9));
        assert!(approx_eq!(f64, token.usd_value, other.usd_value, epsilon = 1e-9));
    }
}

#[tokio::test]
async fn end_to_end_two_wallets_same_token() {
    let provider = MemoryProvider::new(vec![
        ("addrA", vec![TokenPosition::new("X", 100.0, 50.0)]),
        ("addrB", vec![TokenPosition::new("X", 25.0, 12.5)]),
    ]);

    let summary = aggregate(&addresses(&["addrA", "addrB"]), &provider, Some(0.40))
        .await
        .unwrap();

    let x = summary.global_tokens.get("X").unwrap();
    assert!(approx_eq!(f64, x.quantity, 125.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, x.ada_value, 62.5, epsilon = 1e-9));
    assert!(approx_eq!(f64, x.usd_value, 25.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, summary.total_ada_value, 62.5, epsilon = 1e-9));
    assert!(approx_eq!(f64, summary.total_usd_value, 25.0, epsilon = 1e-9));
    assert_eq!(summary.fiat_rate, 0.40);

    assert_eq!(summary.per_wallet.len(), 2);
    let a = summary.per_wallet.get("addrA").unwrap().get("X").unwrap();
    assert!(approx_eq!(f64, a.quantity, 100.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, a.ada_value, 50.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, a.usd_value, 20.0, epsilon = 1e-9));
    let b = summary.per_wallet.get("addrB").unwrap().get("X").unwrap();
    assert!(approx_eq!(f64, b.quantity, 25.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, b.ada_value, 12.5, epsilon = 1e-9));
    assert!(approx_eq!(f64, b.usd_value, 5.0, epsilon = 1e-9));
}

#[tokio::test]
async fn wallet_order_does_not_change_global_tokens() {
    let provider = MemoryProvider::new(vec![
        (
            "addrA",
            vec![
                TokenPosition::new("X", 1.1, 0.7),
                TokenPosition::new("Y", 3.3, 2.9),
            ],
        ),
        (
            "addrB",
            vec![
                TokenPosition::new("Y", 0.2, 0.1).with_usd_value(0.05),
                TokenPosition::new("Z", 8.0, 4.4),
            ],
        ),
    ]);

    let forward = aggregate(&addresses(&["addrA", "addrB"]), &provider, Some(0.37))
        .await
        .unwrap();
    let reverse = aggregate(&addresses(&["addrB", "addrA"]), &provider, Some(0.37))
        .await
        .unwrap();

    assert_books_close(&forward.global_tokens, &reverse.global_tokens);
    assert!(approx_eq!(f64, forward.total_ada_value, reverse.total_ada_value, epsilon = 1e-9));
    assert_eq!(
        reverse.per_wallet.addresses().collect::<Vec<_>>(),
        vec!["addrB", "addrA"]
    );
}

#[tokio::test]
async fn price_unavailable_short_circuits() {
    let provider = MemoryProvider::new(vec![("addrA", vec![TokenPosition::new("X", 1.0, 1.0)])]);

    let result = aggregate(&addresses(&["addrA", "addrB"]), &provider, None).await;

    assert_eq!(result.unwrap_err(), AggregationError::PriceUnavailable);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn tracker_without_price_never_fetches_wallets() {
    let provider = Arc::new(MemoryProvider::new(vec![(
        "addrA",
        vec![TokenPosition::new("X", 1.0, 1.0)],
    )]));
    let tracker = PortfolioTracker::new(
        provider.clone(),
        Arc::new(NoPrice),
        Arc::new(CompositeEventHandler::new()),
    );

    let result = tracker.profile(&addresses(&["addrA"])).await;

    assert_eq!(result.unwrap_err(), AggregationError::PriceUnavailable);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn failed_wallet_is_isolated() {
    let provider = MemoryProvider::new(vec![
        ("addrA", vec![TokenPosition::new("X", 10.0, 5.0)]),
        ("addrC", vec![TokenPosition::new("Y", 4.0, 2.0)]),
    ]);

    let summary = aggregate(&addresses(&["addrA", "addrB", "addrC"]), &provider, Some(0.5))
        .await
        .unwrap();

    assert_eq!(provider.calls(), 3);
    assert_eq!(
        summary.per_wallet.addresses().collect::<Vec<_>>(),
        vec!["addrA", "addrC"]
    );
    assert!(approx_eq!(f64, summary.total_ada_value, 7.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, summary.total_usd_value, 3.5, epsilon = 1e-9));
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].address, "addrB");
}

#[tokio::test]
async fn all_wallets_failing_is_an_empty_success() {
    let provider = MemoryProvider::new(vec![]);

    let summary = aggregate(&addresses(&["addrA", "addrB"]), &provider, Some(0.5))
        .await
        .unwrap();

    assert!(summary.is_empty());
    assert!(summary.per_wallet.is_empty());
    assert_eq!(summary.total_ada_value, 0.0);
    assert_eq!(summary.total_usd_value, 0.0);
    assert_eq!(summary.skipped.len(), 2);
}

#[tokio::test]
async fn missing_balance_contributes_value_only() {
    let provider = MemoryProvider::new(vec![(
        "addrA",
        vec![TokenPosition {
            ticker: Some("SNEK".into()),
            ada_value: Some(10.0),
            ..TokenPosition::default()
        }],
    )]);

    let summary = aggregate(&addresses(&["addrA"]), &provider, Some(0.35))
        .await
        .unwrap();

    let snek = summary.global_tokens.get("SNEK").unwrap();
    assert_eq!(snek.quantity, 0.0);
    assert!(approx_eq!(f64, snek.ada_value, 10.0, epsilon = 1e-9));
    assert!(approx_eq!(f64, snek.usd_value, 3.5, epsilon = 1e-9));
}

#[tokio::test]
async fn totals_agree_with_global_and_wallet_sums() {
    let provider = MemoryProvider::new(vec![
        (
            "addrA",
            vec![
                TokenPosition::new("X", 1.0, 0.1),
                TokenPosition::new("Y", 1.0, 0.2),
                TokenPosition::new("X", 1.0, 0.3),
            ],
        ),
        (
            "addrB",
            vec![
                TokenPosition::new("Y", 1.0, 0.7),
                TokenPosition::new("Z", 1.0, 1.3).with_usd_value(0.9),
            ],
        ),
    ]);

    let summary = aggregate(&addresses(&["addrA", "addrB"]), &provider, Some(0.29))
        .await
        .unwrap();

    let wallet_ada: f64 = summary.per_wallet.iter().map(|w| w.tokens.total_ada_value()).sum();
    let wallet_usd: f64 = summary.per_wallet.iter().map(|w| w.tokens.total_usd_value()).sum();
    assert!(approx_eq!(f64, summary.total_ada_value, wallet_ada, epsilon = 1e-9));
    assert!(approx_eq!(f64, summary.total_ada_value, summary.global_tokens.total_ada_value(), epsilon = 1e-9));
    assert!(approx_eq!(f64, summary.total_usd_value, wallet_usd, epsilon = 1e-9));
    assert!(approx_eq!(f64, summary.total_usd_value, summary.global_tokens.total_usd_value(), epsilon = 1e-9));
}

#[tokio::test]
async fn untickered_tokens_with_distinct_units_stay_separate() {
    let provider = MemoryProvider::new(vec![(
        "addrA",
        vec![
            TokenPosition {
                balance: Some(1.0),
                ada_value: Some(2.0),
                unit: Some("policyA.tokenA".into()),
                ..TokenPosition::default()
            },
            TokenPosition {
                balance: Some(3.0),
                ada_value: Some(4.0),
                unit: Some("policyB.tokenB".into()),
                ..TokenPosition::default()
            },
            TokenPosition {
                balance: Some(5.0),
                ..TokenPosition::default()
            },
        ],
    )]);

    let summary = aggregate(&addresses(&["addrA"]), &provider, Some(0.5))
        .await
        .unwrap();

    assert_eq!(
        summary.global_tokens.keys().collect::<Vec<_>>(),
        vec!["Unknown Token", "policyA.tokenA", "policyB.tokenB"]
    );
}
