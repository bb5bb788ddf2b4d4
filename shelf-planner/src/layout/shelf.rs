use std::{collections::HashSet, convert::TryFrom};

use displaydoc::Display;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::nan_safe_f64_cmp;

/// A named shelf location on the floor plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Shelf {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
        }
    }
}

/// A point on the floor plan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Potential errors of a shelf layout.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum LayoutError {
    /// The shelf name {0:?} is not unique
    DuplicateName(String),
    /// The shelf {0:?} has non-finite coordinates
    NonFiniteCoordinate(String),
}

/// Computes the euclidean distance of two points.
fn l2_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let difference = &a - &b;
    difference.dot(&difference).sqrt()
}

/// The validated shelves of one assignment run.
///
/// Shelves keep the order in which they were supplied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Shelf>", into = "Vec<Shelf>")]
pub struct ShelfLayout {
    shelves: Vec<Shelf>,
    /// One row of `[x, y]` per shelf.
    positions: Array2<f64>,
}

impl ShelfLayout {
    /// Creates a layout from uniquely named shelves with finite coordinates.
    pub fn new(shelves: Vec<Shelf>) -> Result<Self, LayoutError> {
        let mut names = HashSet::with_capacity(shelves.len());
        for shelf in &shelves {
            if !shelf.x.is_finite() || !shelf.y.is_finite() {
                return Err(LayoutError::NonFiniteCoordinate(shelf.name.clone()));
            }
            if !names.insert(shelf.name.as_str()) {
                return Err(LayoutError::DuplicateName(shelf.name.clone()));
            }
        }

        let mut positions = Array2::zeros((shelves.len(), 2));
        for (mut row, shelf) in positions.rows_mut().into_iter().zip(&shelves) {
            row[0] = shelf.x;
            row[1] = shelf.y;
        }

        Ok(Self { shelves, positions })
    }

    pub fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    pub fn len(&self) -> usize {
        self.shelves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shelves.is_empty()
    }

    /// The mean position of all shelves, `None` if there are no shelves.
    pub fn centroid(&self) -> Option<Position> {
        self.positions.mean_axis(Axis(0)).map(|mean| Position {
            x: mean[0],
            y: mean[1],
        })
    }

    /// The distance of each shelf to the centroid.
    pub fn centroid_distances(&self) -> Array1<f64> {
        match self.positions.mean_axis(Axis(0)) {
            Some(centroid) => self
                .positions
                .rows()
                .into_iter()
                .map(|position| l2_distance(position, centroid.view()))
                .collect(),
            None => Array1::zeros(0),
        }
    }

    /// The shelf ids by ascending distance to the centroid.
    ///
    /// Shelves with equal distances keep their supplied order.
    pub fn by_centroid_distance(&self) -> Vec<usize> {
        let distances = self.centroid_distances();
        let mut ids = (0..self.len()).collect::<Vec<_>>();
        ids.sort_by(|&a, &b| nan_safe_f64_cmp(&distances[a], &distances[b]));
        ids
    }

    /// The distances between all pairs of shelves.
    pub fn pairwise_distances(&self) -> Array2<f64> {
        let mut distances = Array2::zeros((self.len(), self.len()));
        for (i, a) in self.positions.rows().into_iter().enumerate() {
            for (j, b) in self.positions.rows().into_iter().enumerate().skip(i + 1) {
                let distance = l2_distance(a, b);
                distances[[i, j]] = distance;
                distances[[j, i]] = distance;
            }
        }
        distances
    }
}

impl TryFrom<Vec<Shelf>> for ShelfLayout {
    type Error = LayoutError;

    fn try_from(shelves: Vec<Shelf>) -> Result<Self, Self::Error> {
        Self::new(shelves)
    }
}

impl From<ShelfLayout> for Vec<Shelf> {
    fn from(layout: ShelfLayout) -> Self {
        layout.shelves
    }
}

#[cfg(test)]
mod tests {
    use ndarray::arr2;
    use test_utils::assert_approx_eq;

    use super::*;
    use crate::tests::{line, unit_square};

    #[test]
    fn test_duplicate_name() {
        let error = ShelfLayout::new(vec![
            Shelf::new("A1", 0., 0.),
            Shelf::new("B1", 1., 0.),
            Shelf::new("A1", 2., 0.),
        ])
        .unwrap_err();

        assert_eq!(error, LayoutError::DuplicateName("A1".into()));
    }

    #[test]
    fn test_non_finite_coordinate() {
        let error = ShelfLayout::new(vec![Shelf::new("A1", f64::NAN, 0.)]).unwrap_err();

        assert_eq!(error, LayoutError::NonFiniteCoordinate("A1".into()));
    }

    #[test]
    fn test_centroid() {
        let centroid = unit_square().centroid().unwrap();

        assert_approx_eq!(f64, centroid.x, 0.5);
        assert_approx_eq!(f64, centroid.y, 0.5);
    }

    #[test]
    fn test_empty_layout() {
        let layout = ShelfLayout::new(Vec::new()).unwrap();

        assert!(layout.is_empty());
        assert!(layout.centroid().is_none());
        assert!(layout.centroid_distances().is_empty());
        assert!(layout.by_centroid_distance().is_empty());
        assert_eq!(layout.pairwise_distances().dim(), (0, 0));
    }

    #[test]
    fn test_equidistant_shelves_keep_supplied_order() {
        let layout = unit_square();

        assert_approx_eq!(f64, layout.centroid_distances(), [0.5_f64.sqrt(); 4]);
        assert_eq!(layout.by_centroid_distance(), [0, 1, 2, 3]);
    }

    #[test]
    fn test_by_centroid_distance() {
        // x = 0, 1, 3, 6 with the centroid at 2.5
        let layout = line(&[0., 1., 3., 6.]);

        assert_approx_eq!(f64, layout.centroid_distances(), [2.5, 1.5, 0.5, 3.5]);
        assert_eq!(layout.by_centroid_distance(), [2, 1, 0, 3]);
    }

    #[test]
    fn test_pairwise_distances() {
        let layout = ShelfLayout::new(vec![
            Shelf::new("A1", 0., 0.),
            Shelf::new("A2", 3., 4.),
            Shelf::new("A3", 0., 4.),
        ])
        .unwrap();

        assert_approx_eq!(
            f64,
            layout.pairwise_distances(),
            arr2(&[[0., 5., 4.], [5., 0., 3.], [4., 3., 0.]]),
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let layout = serde_json::from_str::<ShelfLayout>(
            r#"[{"name": "A1", "x": 0, "y": 0}, {"name": "A2", "x": 1.5, "y": 0}]"#,
        )
        .unwrap();
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.shelves()[1], Shelf::new("A2", 1.5, 0.));

        let error = serde_json::from_str::<ShelfLayout>(
            r#"[{"name": "A1", "x": 0, "y": 0}, {"name": "A1", "x": 1, "y": 0}]"#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("not unique"));
    }
}
