pub mod fi;
pub mod fi_calculator;
pub mod records;
pub mod repository;
pub mod reserve;
pub mod seed;

pub use fi::FiService;
pub use fi_calculator::{FiCalculator, calculate_fi};
pub use records::RecordService;
pub use repository::{Record, Repository, Stored, Stores};
pub use reserve::GoalsReserve;
