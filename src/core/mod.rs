//! Portal domain logic, independent of Discord.

/// Help-desk chatbot
pub mod chatbot;
/// County departments
pub mod departments;
/// Downloadable documents
pub mod downloads;
/// News articles
pub mod news;
/// Revenue reporting and display formatting
pub mod report;
/// County services
pub mod services;
/// Page finder
pub mod site_search;
/// Generic default-preserving store
pub mod store;
/// All stores opened together
pub mod stores;
/// Observable value
pub mod subject;
/// Procurement tenders
pub mod tenders;
