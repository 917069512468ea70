pub mod config;
pub mod logging;

pub mod checksum;
pub mod dataset;
pub mod error;
pub mod features;
pub mod http;
pub mod metadata;
pub mod pipeline;
pub mod writer;
