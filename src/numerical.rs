#![allow(non_snake_case)]
/// numeric side of the pipeline: the evenly spaced sample domain and
/// one-pass sampling of lambdified expressions over it
pub mod sampling;
