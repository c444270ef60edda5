//! Real collaborator implementations backed by external HTTP services

pub mod discovery;
pub mod offers;
pub mod perplexity;
pub mod promotions;
pub mod store;

pub use discovery::RealCasinoDiscovery;
pub use offers::RealOffersSource;
pub use perplexity::PerplexityClient;
pub use promotions::RealPromotionResearch;
pub use store::RealRunStore;
