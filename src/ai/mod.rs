// AI opponent for the right paddle

mod tracker;

pub use tracker::{target_y, track_ball};
