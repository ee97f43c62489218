//! # Tasknest Core Library
//!
//! Local task management: tasks with optional category and due date,
//! categories drawn from a fixed color palette, persisted in SQLite.
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: Data access layer with Repository pattern
//! - [`board`]: In-memory collection state kept consistent with the store
//! - [`projection`]: Filtering, search and sorting for display
//! - [`snapshot`]: JSON export/import format
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tasknest_core::{
//!     board::TaskBoard, db, models::NewTaskData, projection::StatusFilter,
//!     repository::SqliteRepository,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tasknest_core::error::CoreError> {
//!     let pool = db::establish_connection("tasks.db").await?;
//!     let mut board = TaskBoard::load(SqliteRepository::new(pool)).await;
//!
//!     let task = NewTaskData {
//!         title: "Buy milk".to_string(),
//!         ..Default::default()
//!     };
//!     task.validate()?;
//!     board.add_task(task).await?;
//!
//!     board.set_status_filter(StatusFilter::Active);
//!     for task in board.visible_tasks(chrono::Local::now().date_naive()) {
//!         println!("{}", task.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod db;
pub mod error;
pub mod models;
pub mod projection;
pub mod repository;
pub mod snapshot;
