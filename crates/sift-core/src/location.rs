//! Coordinates, map views and grouping of records by coordinate pair.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Squared planar distance. Only used for ordering, so no square root.
    pub fn distance(&self, other: &Location) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlng = self.longitude - other.longitude;
        dlat * dlat + dlng * dlng
    }

    fn key(&self) -> (u64, u64) {
        (self.latitude.to_bits(), self.longitude.to_bits())
    }
}

/// Map center and zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Location,
    pub zoom: f64,
}

impl MapView {
    pub fn new(center: Location, zoom: f64) -> Self {
        Self { center, zoom }
    }
}

/// Records grouped by coordinate pair, in first-seen order.
#[derive(Debug, Clone)]
pub struct LocationListMap<T> {
    groups: Vec<(Location, Vec<T>)>,
    index: HashMap<(u64, u64), usize>,
}

impl<T> Default for LocationListMap<T> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> LocationListMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, location: Location, record: T) {
        match self.index.get(&location.key()) {
            Some(&i) => self.groups[i].1.push(record),
            None => {
                self.index.insert(location.key(), self.groups.len());
                self.groups.push((location, vec![record]));
            }
        }
    }

    pub fn get(&self, location: &Location) -> Option<&[T]> {
        self.index
            .get(&location.key())
            .map(|&i| self.groups[i].1.as_slice())
    }

    /// Number of distinct locations.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Location, &[T])> {
        self.groups
            .iter()
            .map(|(location, records)| (location, records.as_slice()))
    }
}

/// Splits records into per-location entries for the map surface.
pub trait LocationGrouper<T> {
    fn group(&self, records: &[T]) -> LocationListMap<T>;
}

/// Sort records nearest-first by `distance`; records without a location
/// (`None`) go last.
pub fn sort_by_distance<T>(records: &mut [T], distance: impl Fn(&T) -> Option<f64>) {
    records.sort_by(|a, b| {
        let a = distance(a).unwrap_or(f64::INFINITY);
        let b = distance(b).unwrap_or(f64::INFINITY);
        a.total_cmp(&b)
    });
}
