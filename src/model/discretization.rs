//! Computational discretization of the 1D network and the 2D grid.

use crate::model::geometry::{Envelope, Point};
use crate::model::network::Branch;
use serde::{Deserialize, Serialize};

/// A computational point on a branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkLocation {
    pub name: String,
    pub branch: String,
    pub chainage: f64,
}

impl NetworkLocation {
    pub fn new(name: impl Into<String>, branch: impl Into<String>, chainage: f64) -> Self {
        Self {
            name: name.into(),
            branch: branch.into(),
            chainage,
        }
    }
}

/// Which end of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchEnd {
    Begin,
    End,
}

/// Piece of a branch between two consecutive computational points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment1D {
    pub start_chainage: f64,
    pub end_chainage: f64,
}

impl Segment1D {
    pub fn length(&self) -> f64 {
        self.end_chainage - self.start_chainage
    }
}

/// Computational points of the 1D network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Discretization {
    pub name: String,
    pub locations: Vec<NetworkLocation>,
}

impl Discretization {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Points on `branch`, ordered by chainage.
    pub fn locations_for_branch(&self, branch: &str) -> Vec<&NetworkLocation> {
        let mut locations: Vec<_> = self.locations.iter().filter(|l| l.branch == branch).collect();
        locations.sort_by(|a, b| a.chainage.total_cmp(&b.chainage));
        locations
    }

    /// The point sitting on the begin or end node of `branch`, within `tolerance`.
    pub fn location_for_branch_node(
        &self,
        branch: &Branch,
        end: BranchEnd,
        tolerance: f64,
    ) -> Option<&NetworkLocation> {
        let node_chainage = match end {
            BranchEnd::Begin => 0.0,
            BranchEnd::End => branch.length,
        };
        self.locations
            .iter()
            .find(|l| l.branch == branch.name && (l.chainage - node_chainage).abs() < tolerance)
    }

    /// Consecutive point pairs on `branch`.
    pub fn segments_for_branch(&self, branch: &str) -> Vec<Segment1D> {
        self.locations_for_branch(branch)
            .windows(2)
            .map(|pair| Segment1D {
                start_chainage: pair[0].chainage,
                end_chainage: pair[1].chainage,
            })
            .collect()
    }
}

/// Unstructured 2D grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grid2D {
    pub vertices: Vec<Point>,
    /// Vertex indices per cell.
    pub cells: Vec<Vec<usize>>,
}

impl Grid2D {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding box of all vertices.
    pub fn extent(&self) -> Option<Envelope> {
        Envelope::of(self.vertices.iter().copied())
    }

    /// A regular grid of `nx` by `ny` unit cells with its lower left corner at the origin.
    pub fn regular(nx: usize, ny: usize, cell_size: f64) -> Self {
        let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
        for j in 0..=ny {
            for i in 0..=nx {
                vertices.push(Point::new(i as f64 * cell_size, j as f64 * cell_size));
            }
        }
        let mut cells = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let lower = j * (nx + 1) + i;
                let upper = lower + nx + 1;
                cells.push(vec![lower, lower + 1, upper + 1, upper]);
            }
        }
        Self { vertices, cells }
    }
}
