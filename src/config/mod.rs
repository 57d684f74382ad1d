//! Configuration module

mod site;

pub use site::FeedConfig;
pub use site::FeedMessages;
pub use site::SiteConfig;
