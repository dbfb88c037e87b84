// Kabsch algorithm for optimal superposition of two coordinate sets.
// Rotation is solved through the SVD of the cross-covariance matrix.

use nalgebra::Matrix3;

use crate::structure::coordinate::Coordinate;

#[derive(Debug)]
pub struct KabschSuperimposer {
    pub rot: Option<[[f32; 3]; 3]>,
    pub tran: Option<[f32; 3]>,
    pub rms: Option<f32>,
    pub natoms: usize,
}

impl KabschSuperimposer {
    pub fn new() -> Self {
        Self { rot: None, tran: None, rms: None, natoms: 0 }
    }

    /// Compute the rigid transformation mapping `moving` onto `fixed`,
    /// minimizing the sum of squared distances between paired atoms.
    pub fn set_atoms(&mut self, fixed: &[Coordinate], moving: &[Coordinate]) -> Result<(), &'static str> {
        if fixed.len() != moving.len() {
            return Err("Fixed and moving atom lists differ in size");
        }
        if fixed.is_empty() {
            return Err("Cannot superimpose empty atom lists");
        }
        self.natoms = fixed.len();

        let fixed_f64: Vec<[f64; 3]> = fixed.iter().map(to_f64).collect();
        let moving_f64: Vec<[f64; 3]> = moving.iter().map(to_f64).collect();

        let (rot, tran, rms) = kabsch(&fixed_f64, &moving_f64);
        self.rot = Some([
            [rot[0][0] as f32, rot[0][1] as f32, rot[0][2] as f32],
            [rot[1][0] as f32, rot[1][1] as f32, rot[1][2] as f32],
            [rot[2][0] as f32, rot[2][1] as f32, rot[2][2] as f32],
        ]);
        self.tran = Some([tran[0] as f32, tran[1] as f32, tran[2] as f32]);
        self.rms = Some(rms as f32);
        Ok(())
    }

    pub fn get_rotran(&self) -> ([[f32; 3]; 3], [f32; 3]) {
        (
            self.rot.expect("Superposition not performed"),
            self.tran.expect("Superposition not performed"),
        )
    }

    pub fn get_rms(&self) -> f32 {
        self.rms.expect("Superposition not performed")
    }
}

fn to_f64(c: &Coordinate) -> [f64; 3] {
    [c.x as f64, c.y as f64, c.z as f64]
}

fn centroid(coords: &[[f64; 3]]) -> [f64; 3] {
    let n = coords.len() as f64;
    let mut center = [0.0f64; 3];
    for p in coords {
        center[0] += p[0];
        center[1] += p[1];
        center[2] += p[2];
    }
    [center[0] / n, center[1] / n, center[2] / n]
}

/// Returns (rotation, translation, rmsd) with `rot * moving + tran ~= fixed`.
fn kabsch(fixed: &[[f64; 3]], moving: &[[f64; 3]]) -> ([[f64; 3]; 3], [f64; 3], f64) {
    let n = fixed.len();
    let fixed_center = centroid(fixed);
    let moving_center = centroid(moving);

    // Cross-covariance of the centered coordinate sets:
    // h[j][k] = sum_i moving_c[i][j] * fixed_c[i][k]
    let mut h = [[0.0f64; 3]; 3];
    for i in 0..n {
        let m = [
            moving[i][0] - moving_center[0],
            moving[i][1] - moving_center[1],
            moving[i][2] - moving_center[2],
        ];
        let f = [
            fixed[i][0] - fixed_center[0],
            fixed[i][1] - fixed_center[1],
            fixed[i][2] - fixed_center[2],
        ];
        for j in 0..3 {
            for k in 0..3 {
                h[j][k] += m[j] * f[k];
            }
        }
    }

    let rot = rotation_from_covariance(&h);

    // t = fixed_center - rot * moving_center
    let rotated_center = rotate(&rot, &moving_center);
    let tran = [
        fixed_center[0] - rotated_center[0],
        fixed_center[1] - rotated_center[1],
        fixed_center[2] - rotated_center[2],
    ];

    let mut sum_sq = 0.0f64;
    for i in 0..n {
        let t = rotate(&rot, &moving[i]);
        let dx = t[0] + tran[0] - fixed[i][0];
        let dy = t[1] + tran[1] - fixed[i][1];
        let dz = t[2] + tran[2] - fixed[i][2];
        sum_sq += dx * dx + dy * dy + dz * dz;
    }
    let rms = (sum_sq / n as f64).sqrt();

    (rot, tran, rms)
}

// R = V * U^T from the SVD of H, with the reflection case corrected by
// flipping the singular vector of the smallest singular value.
fn rotation_from_covariance(h: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let h_mat = Matrix3::new(
        h[0][0], h[0][1], h[0][2],
        h[1][0], h[1][1], h[1][2],
        h[2][0], h[2][1], h[2][2],
    );
    let svd = h_mat.svd(true, true);
    let u = svd.u.expect("SVD U not computed");
    let v_t = svd.v_t.expect("SVD V^T not computed");
    let v = v_t.transpose();
    let u_t = u.transpose();
    let mut r = v * u_t;
    if r.determinant() < 0.0 {
        let mut v_corrected = v;
        for i in 0..3 {
            v_corrected[(i, 2)] = -v_corrected[(i, 2)];
        }
        r = v_corrected * u_t;
    }
    [
        [r[(0, 0)], r[(0, 1)], r[(0, 2)]],
        [r[(1, 0)], r[(1, 1)], r[(1, 2)]],
        [r[(2, 0)], r[(2, 1)], r[(2, 2)]],
    ]
}

fn rotate(rot: &[[f64; 3]; 3], p: &[f64; 3]) -> [f64; 3] {
    [
        rot[0][0] * p[0] + rot[0][1] * p[1] + rot[0][2] * p[2],
        rot[1][0] * p[0] + rot[1][1] * p[1] + rot[1][2] * p[2],
        rot[2][0] * p[0] + rot[2][1] * p[1] + rot[2][2] * p[2],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_coordinates() {
        let coords = vec![
            Coordinate::new(1.0, 2.0, 3.0),
            Coordinate::new(4.0, 5.0, 6.0),
            Coordinate::new(7.0, 8.0, 10.0),
        ];
        let mut superimposer = KabschSuperimposer::new();
        superimposer.set_atoms(&coords, &coords).unwrap();
        assert!(superimposer.get_rms() < 1e-6);
    }

    #[test]
    fn test_translated_coordinates() {
        let fixed = vec![
            Coordinate::new(0.0, 0.0, 0.0),
            Coordinate::new(3.8, 0.0, 0.0),
            Coordinate::new(7.6, 0.5, 0.0),
        ];
        let moving: Vec<Coordinate> = fixed
            .iter()
            .map(|c| Coordinate::new(c.x + 10.0, c.y - 4.0, c.z + 2.5))
            .collect();
        let mut superimposer = KabschSuperimposer::new();
        superimposer.set_atoms(&fixed, &moving).unwrap();
        assert!(superimposer.get_rms() < 1e-4);

        let (rot, tran) = superimposer.get_rotran();
        // applying the transform maps moving onto fixed
        for (f, m) in fixed.iter().zip(moving.iter()) {
            let x = rot[0][0] * m.x + rot[0][1] * m.y + rot[0][2] * m.z + tran[0];
            let y = rot[1][0] * m.x + rot[1][1] * m.y + rot[1][2] * m.z + tran[1];
            let z = rot[2][0] * m.x + rot[2][1] * m.y + rot[2][2] * m.z + tran[2];
            assert!((x - f.x).abs() < 1e-3);
            assert!((y - f.y).abs() < 1e-3);
            assert!((z - f.z).abs() < 1e-3);
        }
    }

    #[test]
    fn test_rotated_coordinates() {
        // 90-degree rotation around z: (x, y, z) -> (-y, x, z)
        let fixed = vec![
            Coordinate::new(1.0, 0.0, 0.0),
            Coordinate::new(0.0, 1.0, 0.0),
            Coordinate::new(0.0, 0.0, 1.0),
            Coordinate::new(2.0, 1.0, -1.0),
        ];
        let moving: Vec<Coordinate> = fixed
            .iter()
            .map(|c| Coordinate::new(c.y, -c.x, c.z))
            .collect();
        let mut superimposer = KabschSuperimposer::new();
        superimposer.set_atoms(&fixed, &moving).unwrap();
        assert!(superimposer.get_rms() < 1e-4, "rms = {}", superimposer.get_rms());
    }

    #[test]
    fn test_rmsd_nonnegative_on_noise() {
        let fixed = vec![
            Coordinate::new(0.0, 0.0, 0.0),
            Coordinate::new(1.0, 0.0, 0.0),
            Coordinate::new(0.0, 1.0, 0.0),
        ];
        let moving = vec![
            Coordinate::new(0.2, 0.0, 0.0),
            Coordinate::new(1.0, 0.3, 0.0),
            Coordinate::new(0.0, 1.0, 0.4),
        ];
        let mut superimposer = KabschSuperimposer::new();
        superimposer.set_atoms(&fixed, &moving).unwrap();
        assert!(superimposer.get_rms() > 0.0);
    }

    #[test]
    fn test_mismatched_sizes() {
        let a = vec![Coordinate::new(0.0, 0.0, 0.0)];
        let b = vec![Coordinate::new(0.0, 0.0, 0.0), Coordinate::new(1.0, 0.0, 0.0)];
        let mut superimposer = KabschSuperimposer::new();
        assert!(superimposer.set_atoms(&a, &b).is_err());
        assert!(superimposer.set_atoms(&[], &[]).is_err());
    }
}
