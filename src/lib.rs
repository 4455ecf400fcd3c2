//! Vitality API Library
//!
//! This library provides the core functionality for the Vitality health
//! analysis API: the longevity scoring engine, the external insights
//! integration, persistence of analyzed records, and HTTP handlers.
//!
//! # Modules
//!
//! - `circuit_breaker`: Circuit breaker guarding the insights service.
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `insights`: Client for the external text-generation service.
//! - `models`: Core data models.
//! - `scoring`: Longevity scoring engine (pure, deterministic).
//! - `storage`: Health record storage operations.
//! - `studies`: Curated research references.

pub mod circuit_breaker;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod insights;
pub mod models;
pub mod scoring;
pub mod storage;
pub mod studies;
