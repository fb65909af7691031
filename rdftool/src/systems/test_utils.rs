use crate::Vector3D;
use super::{UnitCell, Frame, SimpleFrame, MemoryTrajectory};

pub fn test_frame(name: &str) -> SimpleFrame {
    match name {
        "water" => get_water(),
        "dimer" => get_dimer(),
        "cubic-lattice" => get_cubic_lattice(),
        "water-box" => get_water_box(10.0),
        _ => panic!("unknown test frame {}", name)
    }
}

pub fn test_trajectory(name: &str) -> MemoryTrajectory {
    match name {
        // the same dimer 3 times
        "dimer" => (0..3).map(|_| get_dimer()).collect(),
        // the water box in cells of increasing size
        "water-box" => [10.0, 11.0, 12.0, 13.0].iter().map(|&length| get_water_box(length)).collect(),
        // 5 identical frames
        "cubic-lattice" => (0..5).map(|_| get_cubic_lattice()).collect(),
        _ => panic!("unknown test trajectory {}", name)
    }
}

fn get_water() -> SimpleFrame {
    let mut frame = SimpleFrame::new(UnitCell::cubic(10.0));
    frame.add_atom(Vector3D::new(0.0, 0.0, 0.0));
    frame.add_atom(Vector3D::new(0.0, 0.75545, -0.58895));
    frame.add_atom(Vector3D::new(0.0, -0.75545, -0.58895));
    return frame;
}

/// Two atoms separated by 5 Å, in a box with a volume of 1000 Å^3
fn get_dimer() -> SimpleFrame {
    let mut frame = SimpleFrame::new(UnitCell::cubic(10.0));
    frame.add_atom(Vector3D::new(1.0, 1.0, 1.0));
    frame.add_atom(Vector3D::new(4.0, 5.0, 1.0));
    return frame;
}

/// Simple cubic lattice with a lattice parameter of 2 Å, 5x5x5 atoms
fn get_cubic_lattice() -> SimpleFrame {
    let mut frame = SimpleFrame::new(UnitCell::cubic(10.0));
    for i in 0..5 {
        for j in 0..5 {
            for k in 0..5 {
                frame.add_atom(Vector3D::new(2.0 * i as f64, 2.0 * j as f64, 2.0 * k as f64));
            }
        }
    }
    return frame;
}

/// 8 water molecules on a 2x2x2 grid in a cubic cell of side `length`. Atoms
/// are ordered by molecule (O, H, H), and each molecule is at the same
/// fractional position whatever the cell size.
fn get_water_box(length: f64) -> SimpleFrame {
    let mut frame = SimpleFrame::new(UnitCell::cubic(length));
    let water = get_water();
    for i in 0..2 {
        for j in 0..2 {
            for k in 0..2 {
                let center = Vector3D::new(i as f64, j as f64, k as f64) * (0.5 * length)
                    + Vector3D::new(1.0, 1.0, 1.0);
                for &position in water.positions().expect("simple frames always have positions") {
                    frame.add_atom(center + position);
                }
            }
        }
    }
    return frame;
}
