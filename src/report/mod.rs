pub mod aggregator;
pub mod catalog;
pub mod metrics;
pub mod narrative;
pub mod publisher;
pub mod resolver;

pub use catalog::ReportCatalog;
pub use publisher::{LinkPublisher, PublishPayload, PublishedLink};
pub use resolver::{PublicResolver, ResolveOutcome};
