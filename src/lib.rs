//! GymHero Backend
//!
//! A workout and recovery tracking API.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Business logic and authorization
//! - Repository: Generic data access over SQLx
//! - Database: PostgreSQL with SQLx

pub mod allow_list;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
