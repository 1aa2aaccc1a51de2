use factgraph_core::{Route, RouteName, RouteTable};

#[test]
fn standard_table_dispatches_both_views() {
    let table = RouteTable::standard();
    let names: Vec<_> = table.entries().iter().map(|e| e.name).collect();
    assert_eq!(names, vec![RouteName::ServicePage, RouteName::TaskStatus]);
    assert_eq!(table.entries()[1].pattern.as_str(), "/tasks/:id");

    assert_eq!(table.resolve("/").name(), Some(RouteName::ServicePage));
    assert_eq!(
        table.resolve("/tasks/42"),
        Route::TaskStatus { id: "42".into() }
    );
    assert_eq!(
        table.resolve("/tasks/abc-xyz"),
        Route::TaskStatus {
            id: "abc-xyz".into()
        }
    );
    let missing = table.resolve("/does-not-exist");
    assert_eq!(missing.name(), None);
    assert_eq!(missing.path(), "/does-not-exist");
}

#[test]
fn resolved_routes_round_trip_through_their_paths() {
    let table = RouteTable::standard();
    for route in [
        Route::Service,
        Route::TaskStatus { id: "1a2b3c4d".into() },
        Route::TaskStatus { id: "新聞 42".into() },
    ] {
        assert_eq!(table.resolve(&route.path()), route);
    }
}
