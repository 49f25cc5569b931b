pub mod alphabet;
pub mod changes;
pub mod consistency;
pub mod edit_distance;
pub mod report;
