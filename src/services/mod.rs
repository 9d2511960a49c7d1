mod balance_service;
#[cfg(test)]
mod tests;

pub use balance_service::BalanceService;
