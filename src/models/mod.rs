pub mod attempt;
pub mod quiz;
pub mod temp_grid;
pub mod ticket;
