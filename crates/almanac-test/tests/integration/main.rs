//! End-to-end tests driving the salvo service.

mod addressing;
mod auth;
mod delete;
mod get_head;
mod helpers;
mod propfind;
mod put;
mod timezone;
