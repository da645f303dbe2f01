//! Containers attach behavior to markup the views already rendered.

pub mod bills;
