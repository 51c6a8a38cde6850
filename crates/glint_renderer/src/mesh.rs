//! Indexed triangle mesh.
//!
//! Holds in-memory triangle soup and turns it into `Triangle` primitives that
//! share one material. Counter-clockwise winding faces outward.

use crate::{HittableList, Material, RenderError, RenderResult, Triangle};
use glint_math::{Aabb, Vec3};
use std::sync::Arc;

/// A mesh consisting of vertex positions, optional normals, and triangle indices.
///
/// Fields are only set through `new`, so every index is in range and any
/// normals line up with the positions.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    positions: Vec<Vec3>,

    /// Vertex normals (one per vertex when present)
    normals: Option<Vec<Vec3>>,

    /// Triangle indices (every 3 indices form a triangle)
    indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh, checking that the indices describe whole triangles
    /// over existing vertices and that any normals match the vertex count.
    pub fn new(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        normals: Option<Vec<Vec3>>,
    ) -> RenderResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(RenderError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(RenderError::InvalidMesh(format!(
                "index {bad} out of range for {} vertices",
                positions.len()
            )));
        }
        if let Some(normals) = &normals {
            if normals.len() != positions.len() {
                return Err(RenderError::InvalidMesh(format!(
                    "{} normals for {} vertices",
                    normals.len(),
                    positions.len()
                )));
            }
        }

        Ok(Self {
            positions,
            normals,
            indices,
        })
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Face normals are accumulated unnormalized, so larger faces weigh more.
    /// Vertices touched only by degenerate faces get +Y.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for face in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [face[0] as usize, face[1] as usize, face[2] as usize];
            let p0 = self.positions[i0];
            let face_normal = (self.positions[i1] - p0).cross(self.positions[i2] - p0);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            *normal = normal.try_normalize().unwrap_or(Vec3::Y);
        }

        self.normals = Some(normals);
    }

    /// Ensure the mesh has normals, computing them if necessary.
    pub fn ensure_normals(&mut self) {
        if self.normals.is_none() {
            log::debug!(
                "Computing smooth normals for mesh with {} vertices",
                self.positions.len()
            );
            self.compute_normals();
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Aabb {
        self.positions
            .iter()
            .fold(Aabb::EMPTY, |acc, &p| acc.merge(&Aabb::new(p, p)))
    }

    /// Build one `Triangle` per face, all sharing `material`.
    pub fn triangles(&mut self, material: Arc<dyn Material>) -> Vec<Triangle> {
        self.ensure_normals();
        let normals = self.normals.as_deref().unwrap_or_default();

        self.indices
            .chunks_exact(3)
            .map(|face| {
                let idx = [face[0] as usize, face[1] as usize, face[2] as usize];
                Triangle::new(
                    idx.map(|i| self.positions[i]),
                    idx.map(|i| normals[i]),
                    material.clone(),
                )
            })
            .collect()
    }

    /// Triangles of the mesh as an owned primitive list.
    pub fn into_list(mut self, material: Arc<dyn Material>) -> HittableList {
        let mut list = HittableList::new();
        list.extend(self.triangles(material));
        list
    }
}
