use hexlay::{
    hexagon_len, FloodShape, HexCoordinate, HexagonShape, Layout,
    LayoutConfig, RingShape, ShapeConfig, SpiralShape,
};

/// Sanity check, make sure the default config generates what it says it does
#[test]
fn test_layout_default() {
    let config = LayoutConfig::default();
    let layout = Layout::generate(config.clone()).unwrap();
    assert_eq!(layout.config(), &config);
    assert_eq!(layout.len(), hexagon_len(5));
    assert!(layout.contains(HexCoordinate::ORIGIN));
    assert!(!layout.contains(HexCoordinate::new(6, 0)));
}

/// Overlapping shapes should only produce each cell once, and the cell
/// belongs to whichever shape got there first
#[test]
fn test_layout_dedupe() {
    let config = LayoutConfig {
        name: "overlap".into(),
        shapes: vec![
            ShapeConfig::Ring(RingShape {
                center: HexCoordinate::ORIGIN,
                radius: 2,
            }),
            ShapeConfig::Hexagon(HexagonShape {
                center: HexCoordinate::ORIGIN,
                radius: 2,
            }),
            ShapeConfig::Spiral(SpiralShape {
                center: HexCoordinate::new(4, 0),
                min_radius: 0,
                max_radius: 1,
            }),
        ],
    };
    let layout = Layout::generate(config).unwrap();

    // Expected order is each shape's cells in turn, skipping repeats
    let ring_cells = hexlay::ring(HexCoordinate::ORIGIN, 2);
    let mut expected: Vec<HexCoordinate> = ring_cells.clone();
    for cell in hexlay::hexagon(HexCoordinate::ORIGIN, 2)
        .into_iter()
        .chain(hexlay::spiral(HexCoordinate::new(4, 0), 0, 1))
    {
        if !expected.contains(&cell) {
            expected.push(cell);
        }
    }
    assert_eq!(layout.coordinates().collect::<Vec<_>>(), expected);

    // The first shape keeps its cells
    for cell in ring_cells {
        assert_eq!(layout.get(cell).unwrap().shape, 0);
    }
    assert_eq!(layout.get(HexCoordinate::ORIGIN).unwrap().shape, 1);
    assert_eq!(layout.get(HexCoordinate::new(4, 0)).unwrap().shape, 2);
}

#[test]
fn test_layout_flood() {
    let config = LayoutConfig {
        name: "flood".into(),
        shapes: vec![ShapeConfig::Flood(FloodShape {
            seeds: vec![HexCoordinate::new(-3, 3)],
            blocked: vec![],
            max_distance: 4,
        })],
    };
    let layout = Layout::generate(config).unwrap();
    assert_eq!(layout.len(), hexagon_len(4));
    assert_eq!(
        layout.coordinates().next(),
        Some(HexCoordinate::new(-3, 3))
    );
}

#[cfg(feature = "json")]
#[test]
fn test_layout_json() {
    let layout = Layout::generate(LayoutConfig::default()).unwrap();
    let json = layout.to_json().unwrap();
    // Cells are a list, not a keyed object
    assert!(json.contains(r#""cells":[{"coordinate":{"q":"#));

    let loaded = Layout::from_json(&json).unwrap();
    assert_eq!(loaded, layout);
}
