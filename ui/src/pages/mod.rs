//! Page components, one per route

pub mod home;
pub mod placeholder;
pub mod query;
pub mod signin;
pub mod signup;
pub mod upload;
