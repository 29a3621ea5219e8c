//! World graph loader.

use std::collections::HashSet;
use std::path::Path;

use quest_core::{Location, LocationId, Station, StationId};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// World file layout: locations with their stations nested inside.
#[derive(Debug, Clone, Deserialize)]
struct WorldRon {
    locations: Vec<LocationRon>,
}

#[derive(Debug, Clone, Deserialize)]
struct LocationRon {
    id: String,
    name: String,
    order: u32,
    #[serde(default)]
    stations: Vec<StationRon>,
}

#[derive(Debug, Clone, Deserialize)]
struct StationRon {
    id: String,
    name: String,
    order: u32,
}

/// Flattened world graph, sorted by order key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldGraph {
    pub locations: Vec<Location>,
    /// Sorted by (location order, station order).
    pub stations: Vec<Station>,
}

/// Loader for the world graph from RON files.
pub struct WorldLoader;

impl WorldLoader {
    pub fn load(path: &Path) -> LoadResult<WorldGraph> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses and validates a world graph.
    ///
    /// Location ids, location order keys, and station ids must be unique;
    /// station order keys must be unique within their location.
    pub fn parse(content: &str) -> LoadResult<WorldGraph> {
        let data: WorldRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world RON: {}", e))?;

        let mut location_ids = HashSet::new();
        let mut location_orders = HashSet::new();
        let mut station_ids = HashSet::new();
        let mut graph = WorldGraph::default();

        let mut locations = data.locations;
        locations.sort_by_key(|location| location.order);

        for location in locations {
            anyhow::ensure!(
                location_ids.insert(location.id.clone()),
                "duplicate location id '{}'",
                location.id
            );
            anyhow::ensure!(
                location_orders.insert(location.order),
                "location '{}' reuses order key {}",
                location.id,
                location.order
            );

            let location_id = LocationId::new(location.id);
            let mut station_orders = HashSet::new();
            let mut stations = location.stations;
            stations.sort_by_key(|station| station.order);

            for station in stations {
                anyhow::ensure!(
                    station_ids.insert(station.id.clone()),
                    "duplicate station id '{}'",
                    station.id
                );
                anyhow::ensure!(
                    station_orders.insert(station.order),
                    "station '{}' reuses order key {} in location '{}'",
                    station.id,
                    station.order,
                    location_id
                );
                graph.stations.push(Station {
                    id: StationId::new(station.id),
                    location: location_id.clone(),
                    name: station.name,
                    order: station.order,
                });
            }

            graph.locations.push(Location {
                id: location_id,
                name: location.name,
                order: location.order,
            });
        }

        Ok(graph)
    }
}
