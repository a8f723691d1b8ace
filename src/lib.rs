pub mod audio;
pub mod capture;
pub mod config;
pub mod describe;
pub mod reconciler;
pub mod session;
pub mod speech;
