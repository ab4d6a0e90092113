pub mod base_case;
pub mod find_pivots;

pub use base_case::{base_case, BaseCaseResult};
pub use find_pivots::{find_pivots, FindPivotsResult};
