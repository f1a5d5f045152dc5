pub mod api;
pub mod ledger;
pub mod session;
pub mod storage;
