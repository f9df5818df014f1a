pub mod client;
pub mod worker;
