pub mod fetch;
pub mod list;
pub mod merge;
pub mod render;
pub mod run;
