pub mod auth;
pub mod backend;
pub mod booking;
pub mod calendar;
pub mod catalog;
pub mod ledger;
pub mod pricing;
pub mod receipt;
pub mod session;
pub mod storage;
