//! World graph served through [`quest_core::WorldOracle`].
use quest_content::WorldGraph;
use quest_core::{Location, LocationId, Station, StationId, WorldOracle};

/// WorldOracle implementation backed by a loaded [`WorldGraph`].
///
/// Lookups scan the graph; content packs hold a handful of locations, so no
/// index is kept.
pub struct WorldOracleImpl {
    locations: Vec<Location>,
    stations: Vec<Station>,
}

impl WorldOracleImpl {
    pub fn new(graph: WorldGraph) -> Self {
        let WorldGraph {
            mut locations,
            mut stations,
        } = graph;
        locations.sort_by_key(|location| location.order);
        stations.sort_by_key(|station| station.order);
        Self {
            locations,
            stations,
        }
    }

    fn stations_of<'a>(&'a self, location: &'a LocationId) -> impl Iterator<Item = &'a Station> {
        self.stations
            .iter()
            .filter(move |station| &station.location == location)
    }
}

impl WorldOracle for WorldOracleImpl {
    fn first_location(&self) -> Option<Location> {
        self.locations.first().cloned()
    }

    fn first_station(&self, location: &LocationId) -> Option<Station> {
        self.stations_of(location).next().cloned()
    }

    fn next_station(&self, location: &LocationId, after_order: u32) -> Option<Station> {
        self.stations_of(location)
            .find(|station| station.order > after_order)
            .cloned()
    }

    fn next_location(&self, after_order: u32) -> Option<Location> {
        self.locations
            .iter()
            .find(|location| location.order > after_order)
            .cloned()
    }

    fn location(&self, id: &LocationId) -> Option<Location> {
        self.locations
            .iter()
            .find(|location| &location.id == id)
            .cloned()
    }

    fn station(&self, id: &StationId) -> Option<Station> {
        self.stations.iter().find(|station| &station.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(id: &str, order: u32) -> Location {
        Location {
            id: LocationId::new(id),
            name: id.to_string(),
            order,
        }
    }

    fn station(location: &str, id: &str, order: u32) -> Station {
        Station {
            id: StationId::new(id),
            location: LocationId::new(location),
            name: id.to_string(),
            order,
        }
    }

    fn oracle() -> WorldOracleImpl {
        WorldOracleImpl::new(WorldGraph {
            locations: vec![location("library", 5), location("meadow", 1)],
            stations: vec![
                station("meadow", "pond", 2),
                station("library", "hall", 1),
                station("meadow", "gate", 1),
            ],
        })
    }

    #[test]
    fn walks_graph_in_order_key_sequence() {
        let world = oracle();
        let meadow = world.first_location().unwrap();
        assert_eq!(meadow.id.as_str(), "meadow");

        let gate = world.first_station(&meadow.id).unwrap();
        assert_eq!(gate.id.as_str(), "gate");
        let pond = world.next_station(&meadow.id, gate.order).unwrap();
        assert_eq!(pond.id.as_str(), "pond");
        assert!(world.next_station(&meadow.id, pond.order).is_none());

        let library = world.next_location(meadow.order).unwrap();
        assert_eq!(library.id.as_str(), "library");
        assert!(world.next_location(library.order).is_none());
    }

    #[test]
    fn lookups_by_id() {
        let world = oracle();
        assert_eq!(world.station(&StationId::new("hall")).unwrap().order, 1);
        assert_eq!(world.location(&LocationId::new("library")).unwrap().order, 5);
        assert!(world.station(&StationId::new("attic")).is_none());
    }
}
