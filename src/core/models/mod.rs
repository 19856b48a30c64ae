pub mod audit;
pub mod participant;
pub mod settlement;
pub mod transaction;
pub mod trip;
