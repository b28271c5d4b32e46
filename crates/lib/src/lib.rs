//! Bookbot core library: keyword extraction, book search, Telegram channel and the webhook gateway,
//! used by the `bookbot` CLI.

pub mod books;
pub mod channels;
pub mod config;
pub mod gateway;
pub mod init;
pub mod nlp;
pub mod reply;
