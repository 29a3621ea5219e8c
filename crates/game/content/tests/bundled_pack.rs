use quest_content::{ContentFactory, bundled_data_dir};

#[test]
fn bundled_pack_loads() {
    let pack = ContentFactory::new(bundled_data_dir())
        .load_all()
        .expect("bundled content pack should load");

    assert_eq!(pack.config.total_steps_per_station, 3);
    assert_eq!(pack.world.locations.len(), 2);
    assert_eq!(pack.world.stations.len(), 4);
    assert_eq!(pack.world.stations[0].id.as_str(), "meadow_gate");
    assert!(pack.heroes.iter().any(|hero| hero.id.as_str() == "knight"));
    assert!(pack.dangling_monsters().is_empty());
}

#[test]
fn bundled_pack_leaves_a_step_open() {
    let pack = ContentFactory::new(bundled_data_dir()).load_all().unwrap();

    let configured = pack
        .steps
        .iter()
        .filter(|entry| entry.station.as_str() == "library_hall")
        .count();
    assert_eq!(configured, 2);
}
