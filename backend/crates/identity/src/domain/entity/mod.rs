pub mod social_login;
pub mod user;
