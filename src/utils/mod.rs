pub mod api;
pub mod html;
pub mod logger;
pub mod signature;
pub mod spinner;
pub mod version;
