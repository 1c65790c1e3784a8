use std::path::Path;

use compass_rs_renderer::{
    Extents, GraphConfig, Theme, compute_layout, load_levels, render_svg,
};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
    assert!(!svg.contains("NaN"), "{fixture}: NaN leaked into the output");
}

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let fixtures = ["compass_basic.json", "dangling_edges.json", "string_coords.json"];

    for fixture in fixtures {
        let set = load_levels(&fixture_path(fixture)).expect("fixture load failed");
        assert!(!set.is_empty(), "{fixture}: no levels");
        let extents = Extents::of_levels(&set.levels);
        let config = GraphConfig::default();
        for level in &set.levels {
            let layout = compute_layout(level, extents, &config);
            let svg = render_svg(&layout, &Theme::compass_default(), &config);
            assert_valid_svg(&svg, fixture);
        }
    }
}

#[test]
fn basic_fixture_draws_every_node_and_edge() {
    let set = load_levels(&fixture_path("compass_basic.json")).expect("fixture load failed");
    let extents = Extents::of_levels(&set.levels);
    let config = GraphConfig::default();

    let level = set.level_named("Base Camp").expect("named level");
    let layout = compute_layout(level, extents, &config);
    let svg = render_svg(&layout, &Theme::compass_default(), &config);

    for node in &level.nodes {
        assert!(svg.contains(&node.id), "missing label for {}", node.id);
    }
    assert_eq!(svg.matches("<circle").count(), level.nodes.len());
    assert_eq!(svg.matches("<line").count(), level.edges.len());
}

#[test]
fn dangling_edges_never_reach_the_output() {
    let set = load_levels(&fixture_path("dangling_edges.json")).expect("fixture load failed");
    let extents = Extents::of_levels(&set.levels);
    let config = GraphConfig::default();

    let level = &set.levels[0];
    let layout = compute_layout(level, extents, &config);
    // Three edges in the file; only the one with both endpoints present
    // survives layout.
    assert_eq!(level.edges.len(), 3);
    assert_eq!(layout.edges.len(), 1);

    let svg = render_svg(&layout, &Theme::compass_default(), &config);
    assert_eq!(svg.matches("<line").count(), 1);
}

#[test]
fn level_switching_keeps_the_scale_stable() {
    let set = load_levels(&fixture_path("compass_basic.json")).expect("fixture load failed");
    let extents = Extents::of_levels(&set.levels);
    let config = GraphConfig::default();

    // The shared node sits at the same data position in both levels, so with
    // set-wide extents it must land on the same canvas position.
    let first = compute_layout(&set.levels[0], extents, &config);
    let second = compute_layout(&set.levels[1], extents, &config);
    let in_first = first.nodes.iter().find(|n| n.id == "ridge").unwrap();
    let in_second = second.nodes.iter().find(|n| n.id == "ridge").unwrap();
    assert_eq!((in_first.x, in_first.y), (in_second.x, in_second.y));
}
