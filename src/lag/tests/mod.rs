//! Lag polling tests

mod helpers;
