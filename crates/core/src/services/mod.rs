pub mod analysis_service;
pub mod asset_editor;
pub mod render_service;
pub mod resolver_service;
pub mod store;
pub mod upload_service;
