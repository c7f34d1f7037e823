#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod coordinator_ops;
mod mock_api;
