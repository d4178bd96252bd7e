// Service exports
pub mod cache;
pub mod notifications;
pub mod payments;
pub mod postgres;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use notifications::{NotificationClient, NotificationError};
pub use payments::{CheckoutSession, PaymentProviderClient, PaymentProviderError};
pub use postgres::{MarketplaceStore, StoreError};
