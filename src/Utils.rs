//! different utility modules used throughout the project
/// tiny module to plot the overlaid function/derivative/integral curves
pub mod plots;
