//! Request matching utilities.

mod blocklist;
mod request_url;
mod url_glob;

pub use blocklist::DomainBlocklist;
pub use request_url::{hostname, operation_key, strip_query};
pub use url_glob::UrlGlob;
