#![allow(dead_code)]

pub mod factory;
pub mod failing_repo;

#[allow(unused_imports)]
pub use factory::{card, pid, public_types, table_with, Harness};
#[allow(unused_imports)]
pub use failing_repo::FailingRepo;
