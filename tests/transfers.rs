use std::path::PathBuf;

use tradenet::{
    builder::GraphBuilder,
    config::{Config, InputConfig},
    degree::DegreeBucket,
    error::Error,
    graph::Graph,
    metrics::{Metric, MetricOutput, MetricsEngine},
};

fn transfers() -> Graph<String> {
    let columns = InputConfig {
        attributes: vec!["year".to_owned()],
        ..InputConfig::default()
    };

    let (graph, summary) = GraphBuilder::from_path(testdata("transfers.csv"), &columns).unwrap();
    assert_eq!(summary.rows, 12);
    assert_eq!(summary.dropped, 3);

    graph
}

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name)
}

fn owned(entries: &[(&str, f64)]) -> Vec<(String, f64)> {
    entries
        .iter()
        .map(|&(label, value)| (label.to_owned(), value))
        .collect()
}

#[test]
fn load() {
    let graph = transfers();

    assert_eq!(graph.node_count(), 10);
    assert_eq!(graph.edge_count(), 9);
    assert_eq!(graph.nodes()[0], "USA");

    let first = &graph.edges()[0];
    assert_eq!(first.weight(), Some(120.0));
    assert_eq!(first.attribute("year"), Some(2019.0));
}

#[test]
fn weighted_degree() {
    let graph = transfers();
    let mut engine = MetricsEngine::new(&graph, Config::default().metrics);

    // USA and Russia tie, the earlier vertex ranks first.
    let ranking = engine.weighted_degree();
    assert_eq!(
        &ranking.entries()[..3],
        owned(&[("USA", 245.0), ("Russia", 245.0), ("India", 215.0)])
    );
}

#[test]
fn path_centralities() {
    let graph = transfers();
    let mut engine = MetricsEngine::new(&graph, Config::default().metrics);

    // France -> India -> Russia -> China -> Pakistan is the only long chain.
    let betweenness = engine.betweenness_centrality();
    assert_eq!(betweenness.entries()[0], ("Russia".to_owned(), 4.0 / 72.0));
    assert_eq!(betweenness.get(&"USA".to_owned()), Some(0.0));

    let closeness = engine.closeness_centrality();
    let (top, value) = &closeness.entries()[0];
    assert_eq!(top, "India");
    assert!((value - 2.0 / 9.0).abs() < 1e-12);

    assert!(engine.eigenvector_centrality().is_ok());
}

#[test]
fn structure() {
    let graph = transfers();
    let engine = MetricsEngine::new(&graph, Config::default().metrics);

    let (density, sparsity) = engine.density();
    assert!((density - 0.1).abs() < 1e-12);
    assert!((sparsity - 0.9).abs() < 1e-12);

    assert_eq!(
        engine.degree_distribution().unwrap(),
        vec![
            DegreeBucket { lower: 1, upper: 2, count: 5 },
            DegreeBucket { lower: 2, upper: 3, count: 5 },
        ]
    );

    assert!(engine.assortativity().unwrap().is_finite());

    let components = engine.connected_components().unwrap();
    assert_eq!(components.strong.len(), 9);
    assert!(components
        .strong
        .contains(&vec!["Russia".to_owned(), "India".to_owned()]));
    assert_eq!(
        components.weak,
        vec![
            vec!["USA", "Saudi Arabia", "Australia"],
            vec!["Russia", "India", "France", "China", "Pakistan"],
            vec!["Germany", "Egypt"],
        ]
    );
}

#[test]
fn every_metric_runs() {
    let graph = transfers();
    let mut engine = MetricsEngine::new(&graph, Config::default().metrics);

    for metric in Metric::ALL {
        assert!(engine.run(metric).is_ok(), "{metric}");
    }

    let usa = engine.annotations().get(&"USA".to_owned()).unwrap();
    assert_eq!(usa.degree, Some(3));
    assert_eq!(usa.weighted_degree, Some(245.0));
    assert!(usa.eigenvector_centrality.is_some());
}

#[test]
fn undirected_projection() {
    let graph = transfers().simplified();
    let mut engine = MetricsEngine::new(&graph, Config::default().metrics);

    assert!(matches!(
        engine.run(Metric::ConnectedComponents),
        Err(Error::UnsupportedMode(_))
    ));
    assert!(matches!(
        engine.run(Metric::Density),
        Ok(MetricOutput::Density { .. })
    ));
}
