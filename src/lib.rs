//! User records with geographic locations, and pairwise great-circle
//! distance statistics across all of them.
//!
//! The analytical core lives in [`geo`] and [`stats`]: haversine distances
//! on a 6371 km sphere, reduced over the unique pairs of distinct user
//! coordinates to min/max/mean/population standard deviation. The [`user`]
//! and [`service`] modules carry the surrounding record plumbing: storage,
//! credentials, datasets, and the JSON-shaped operation boundary.

pub mod geo;
pub mod service;
pub mod stats;
pub mod user;
pub mod util;
