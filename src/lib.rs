#![doc = "The `todoapp` library crate."]
#![doc = ""]
#![doc = "A task-tracking backend: user registration and bearer-token login under"]
#![doc = "`/auth`, and todo CRUD under `/todo`. The binary (`main.rs`) wires these"]
#![doc = "modules into an `actix-web` server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
