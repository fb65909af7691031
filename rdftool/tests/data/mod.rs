#![allow(dead_code)]

use serde_json::Value;

use rdftool::{SimpleFrame, UnitCell, Vector3D};
use rdftool::systems::MemoryTrajectory;

/// Load a trajectory from a JSON file in `tests/data`, containing a list of
/// frames with `cell` dimensions (`[a, b, c, alpha, beta, gamma]`) and
/// `positions`.
pub fn load_trajectory(path: &str) -> MemoryTrajectory {
    let json = std::fs::read_to_string(format!("tests/data/{}", path))
        .expect("failed to read input file");

    let data: Value = serde_json::from_str(&json).expect("failed to parse JSON");

    let mut trajectory = MemoryTrajectory::new();
    for frame in data["frames"].as_array().expect("frames must be an array") {
        let cell = read_cell(&frame["cell"]);
        let mut simple_frame = SimpleFrame::new(cell);

        for position in frame["positions"].as_array().expect("positions must be an array") {
            let position = position.as_array().expect("position must be an array");
            simple_frame.add_atom(Vector3D::new(
                position[0].as_f64().unwrap(),
                position[1].as_f64().unwrap(),
                position[2].as_f64().unwrap(),
            ));
        }

        trajectory.push(simple_frame);
    }

    return trajectory;
}

fn read_cell(cell: &Value) -> UnitCell {
    let cell = cell.as_array().expect("cell must be an array");
    let mut dimensions = [0.0; 6];
    for (dimension, value) in dimensions.iter_mut().zip(cell) {
        *dimension = value.as_f64().expect("cell values must be numbers");
    }

    UnitCell::from_dimensions(dimensions).expect("invalid cell")
}

/// Deterministic pseudo-random numbers in `[0, 1)`, using splitmix64
struct SplitMix64(u64);

impl SplitMix64 {
    fn next(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^= z >> 31;
        return (z >> 11) as f64 / (1_u64 << 53) as f64;
    }
}

/// Create a trajectory of `n_frames` frames, each containing `n_atoms` atoms
/// uniformly distributed in a cubic cell of side `length`.
pub fn ideal_gas(n_atoms: usize, length: f64, n_frames: usize, seed: u64) -> MemoryTrajectory {
    let mut random = SplitMix64(seed);
    let mut trajectory = MemoryTrajectory::new();
    for _ in 0..n_frames {
        let mut frame = SimpleFrame::new(UnitCell::cubic(length));
        for _ in 0..n_atoms {
            frame.add_atom(Vector3D::new(
                length * random.next(),
                length * random.next(),
                length * random.next(),
            ));
        }
        trajectory.push(frame);
    }
    return trajectory;
}
