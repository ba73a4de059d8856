mod common;
mod ranking;
mod service;
