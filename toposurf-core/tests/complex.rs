//! Tests for the filtered complex and scene export through the public API.

use rstest::rstest;
use tracing_subscriber::layer::SubscriberExt;

use toposurf_core::{
    FilteredComplex, GridPoint, HighlightError, MergeForest, SamplingDomain, Scene, Simplex,
    Surface, Triangulation,
};
use toposurf_test_support::tracing::RecordingLayer;

#[rstest]
#[case(Triangulation::Standard, 1)]
#[case(Triangulation::Detailed, 1 - 81)]
fn sampled_surface_complex_has_expected_euler_characteristic(
    #[case] triangulation: Triangulation,
    #[case] expected: i64,
) {
    let sampled = Surface::Surface2
        .sample(&SamplingDomain::square(-2.0, 2.0, 10))
        .expect("sampling must succeed");
    let complex = FilteredComplex::from_grid(sampled.grid(), triangulation);

    assert_eq!(complex.count(0), 100);
    assert_eq!(complex.dimension(), Some(2));
    assert_eq!(complex.euler_characteristic(), expected);
}

#[rstest]
fn vertex_filtration_matches_grid_values() {
    let sampled = Surface::Himmelblau
        .sample(&SamplingDomain::square(-4.0, 4.0, 9))
        .expect("sampling must succeed");
    let grid = sampled.grid();
    let complex = FilteredComplex::from_grid(grid, Triangulation::Standard);

    for point in grid.points() {
        let id = point.row() * grid.cols() + point.col();
        assert_eq!(
            complex.filtration_of(&Simplex::vertex(id)),
            grid.value(point)
        );
    }
}

#[rstest]
fn from_grid_emits_span_with_grid_shape() {
    let sampled = Surface::Ackley
        .sample(&SamplingDomain::square(-1.0, 1.0, 5))
        .expect("sampling must succeed");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        FilteredComplex::from_grid(sampled.grid(), Triangulation::Standard)
    });

    let span = layer
        .spans()
        .into_iter()
        .find(|span| span.name == "core.complex.from_grid")
        .expect("core.complex.from_grid span must exist");
    assert_eq!(span.fields.get("rows"), Some(&"5".to_owned()));
    assert_eq!(span.fields.get("cols"), Some(&"5".to_owned()));
}

#[rstest]
fn roots_can_be_highlighted_on_the_scene() {
    let sampled = Surface::Rastrigin
        .sample(&SamplingDomain::square(-3.0, 3.0, 25))
        .expect("sampling must succeed");
    let forest = MergeForest::build(sampled.grid());
    let roots: Vec<GridPoint> = forest.roots().iter().copied().collect();

    let scene = Scene::new(&sampled, &roots).expect("roots lie on the grid");
    assert_eq!(scene.highlights().len(), roots.len());
    for highlight in scene.highlights() {
        assert_eq!(Some(highlight.world.z), sampled.grid().value(highlight.grid));
    }
}

#[rstest]
fn scene_rejects_points_off_the_grid() {
    let sampled = Surface::Surface1
        .sample(&SamplingDomain::square(-1.0, 1.0, 3))
        .expect("sampling must succeed");
    let err = Scene::new(&sampled, &[GridPoint::new(3, 0)]).expect_err("must fail");
    assert!(matches!(err, HighlightError::OutOfRange { rows: 3, cols: 3, .. }));
}
