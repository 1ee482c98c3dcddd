pub use super::contracts::Entity as Contracts;
pub use super::portfolio_items::Entity as PortfolioItems;
