pub mod account;
pub mod delivery;
