pub mod serve;
pub mod show;
