pub mod check;
pub mod clean;
pub mod fingerprint;
pub mod init;
pub mod layout;
