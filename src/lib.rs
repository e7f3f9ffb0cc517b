pub mod buffer;
pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod kernel;
pub mod p2p;
pub mod report;
pub mod smoke;
pub mod verify;
pub mod ze;

#[cfg(test)]
mod tests;
