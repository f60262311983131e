use async_trait::async_trait;

/// Trait for price feed providers
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Get the ADA price in USD, `None` when no usable quote is available
    async fn get_ada_price(&self) -> Option<f64>;
}
