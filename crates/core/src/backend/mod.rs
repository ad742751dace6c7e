pub mod http;
pub mod scope;
pub mod traits;
