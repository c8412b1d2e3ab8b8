pub mod job;
pub mod site;
