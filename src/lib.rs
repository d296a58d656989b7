pub mod config;
pub mod error;
pub mod http;
pub mod image;
pub mod llm;
pub mod pages;
pub mod temp_mail;
pub mod web;
