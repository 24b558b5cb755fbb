//! Router-level tests for the HarveyDrive HTTP API.
//!
//! Most of these drive the full axum `Router` with `tower::ServiceExt::oneshot`
//! over a lazily-connected pool, so every request is answered before any
//! database access. `drive_test` runs against the PostgreSQL database named by
//! `HARVEYDRIVE_TEST_DATABASE_URL` and skips itself when that is unset.

mod helpers;

mod auth_test;
mod drive_test;
mod health_test;
mod share_test;
mod validation_test;
