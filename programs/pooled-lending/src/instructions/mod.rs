pub mod custody;
pub mod initialize_globals;
pub mod update_globals;
pub mod initialize_factory;
pub mod update_factory;
pub mod create_pool;
pub mod pool_admin;
pub mod deposit;
pub mod withdraw;
pub mod withdraw_funds;
pub mod borrower;
pub mod views;

pub use initialize_globals::*;
pub use update_globals::*;
pub use initialize_factory::*;
pub use update_factory::*;
pub use create_pool::*;
pub use pool_admin::*;
pub use deposit::*;
pub use withdraw::*;
pub use withdraw_funds::*;
pub use borrower::*;
pub use views::*;
