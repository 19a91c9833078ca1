pub mod app;
pub mod core;
pub mod lag;

include!(concat!(env!("OUT_DIR"), "/version.rs"));
