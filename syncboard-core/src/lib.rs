// src/lib.rs

pub mod http;
pub mod cookies;
pub mod session;
pub mod client;
pub mod view;
pub mod refresh;

pub use syncboard_common::error::Error;
pub use syncboard_common::models;
pub use http::{DefaultHttpClient, HttpClient, HttpResponse};
pub use client::{PageUrl, StatusClient};
pub use view::{LinkControl, StatusRow, StatusTable, StatusView};
