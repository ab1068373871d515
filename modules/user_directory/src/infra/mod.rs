pub mod cache;
pub mod enrichment;
pub mod storage;
