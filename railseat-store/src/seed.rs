use railseat_core::RouteSeed;

/// The reference timetable, served when configuration lists no routes.
pub fn default_routes() -> Vec<RouteSeed> {
    vec![
        RouteSeed::new("Route1", "London", "France", 20.0),
        RouteSeed::new("Route2", "CityA", "CityB", 120.0),
        RouteSeed::new("Route3", "CityA", "CityD", 140.0),
        RouteSeed::new("Route4", "CityB", "CityC", 110.0),
        RouteSeed::new("Route5", "CityB", "CityD", 130.0),
        RouteSeed::new("Route6", "CityC", "CityD", 150.0),
        RouteSeed::new("Route7", "CityA", "CityE", 160.0),
        RouteSeed::new("Route8", "CityB", "CityE", 170.0),
        RouteSeed::new("Route9", "CityC", "CityE", 180.0),
        RouteSeed::new("Route10", "CityD", "CityE", 190.0),
    ]
}
