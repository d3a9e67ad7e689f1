pub use super::accounts::Entity as Accounts;
pub use super::deliveries::Entity as Deliveries;
