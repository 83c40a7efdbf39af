//! Integration test: full pipeline against a local stub API with the curl fetcher.
//!
//! Two catalog pages of three items, one detail endpoint that fails, image and
//! archive hosts serving fixed bytes. Asserts on snapshots and files on disk.

mod common;

use cdl_core::config::CdlConfig;
use cdl_core::error::PipelineError;
use cdl_core::fetch::CurlFetcher;
use cdl_core::model::{DetailRecord, SummaryRecord};
use cdl_core::pipeline;
use cdl_core::report::ItemFailure;
use cdl_core::snapshot::read_snapshot;
use common::stub_server::StubServer;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn config(server: &StubServer, out: &Path) -> CdlConfig {
    CdlConfig {
        list_endpoint: server.url("/dev-api/list"),
        detail_endpoint: server.url("/dev-api/article/"),
        asset_base_url: server.url("/files/"),
        page_size: 3,
        page_count: 2,
        list_snapshot_path: out.join("list.json"),
        article_snapshot_path: out.join("articles.json"),
        image_dir: out.join("image"),
        archive_dir: out.join("torrent"),
        ..CdlConfig::default()
    }
}

fn summary_json(server: &StubServer, id: i64) -> String {
    format!(
        r#"{{"id": {id}, "title": "Title {id}", "description": "d{id}", "image": "{}", "year": [{{"year": 2019, "article_id": {id}}}]}}"#,
        server.url(&format!("/img/{id}.jpg"))
    )
}

fn page_json(server: &StubServer, ids: &[i64], next: Option<String>) -> String {
    let results: Vec<String> = ids.iter().map(|id| summary_json(server, *id)).collect();
    let next = next
        .map(|n| format!("\"{n}\""))
        .unwrap_or_else(|| "null".to_string());
    format!(
        r#"{{"count": 6, "next": {next}, "previous": null, "results": [{}]}}"#,
        results.join(",")
    )
}

fn detail_json(id: i64, archives: &[&str]) -> String {
    let torrents: Vec<String> = archives
        .iter()
        .map(|name| {
            format!(r#"{{"torrent": "{name}", "torrent_path": "bt/{name}.rar", "article_id": {id}}}"#)
        })
        .collect();
    format!(
        r#"{{"id": {id}, "year": [], "torrent": [{}], "title": "Title {id}", "descriptiion": "d{id}", "content": "<p>{id}</p>", "image": ""}}"#,
        torrents.join(",")
    )
}

/// Serves the standard catalog: ids 1..=6, detail 4 broken, detail 2 with two archives.
fn serve_catalog(server: &StubServer) {
    server.ok(
        "/dev-api/list?page_size=3&page=1",
        page_json(server, &[1, 2, 3], Some(server.url("/dev-api/list?page_size=3&page=2"))),
    );
    server.ok(
        "/dev-api/list?page_size=3&page=2",
        page_json(server, &[4, 5, 6], None),
    );
    for id in 1..=6 {
        server.ok(&format!("/img/{id}.jpg"), format!("image-{id}"));
    }
    server.ok("/dev-api/article/1", detail_json(1, &["A1"]));
    server.ok("/dev-api/article/2", detail_json(2, &["A2a", "A2b"]));
    server.ok("/dev-api/article/3", detail_json(3, &["A3"]));
    server.respond("/dev-api/article/4", 500, "boom");
    server.ok("/dev-api/article/5", detail_json(5, &["A5"]));
    server.ok("/dev-api/article/6", detail_json(6, &["A6"]));
    for name in ["A1", "A2a", "A2b", "A3", "A4", "A5", "A6"] {
        server.ok(&format!("/files/bt/{name}.rar"), format!("archive-{name}"));
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn full_run_produces_snapshots_and_files() {
    let server = StubServer::start();
    serve_catalog(&server);
    let out = tempdir().unwrap();
    let cfg = config(&server, out.path());
    let fetcher = CurlFetcher::new(cfg.http.clone());
    let mut failures: Vec<ItemFailure> = Vec::new();

    let summary = pipeline::run(&cfg, &fetcher, &mut failures).expect("run");

    let list: Vec<SummaryRecord> = read_snapshot(&cfg.list_snapshot_path).unwrap();
    let ids: Vec<i64> = list.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(list[0].years[0].year, 2019);

    let articles: Vec<DetailRecord> = read_snapshot(&cfg.article_snapshot_path).unwrap();
    let ids: Vec<i64> = articles.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 5, 6]);
    assert_eq!(articles[1].description, "d2");

    assert_eq!(
        file_names(&cfg.image_dir),
        vec!["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg", "6.jpg"]
    );
    assert_eq!(
        fs::read_to_string(cfg.image_dir.join("4.jpg")).unwrap(),
        "image-4"
    );
    assert_eq!(
        file_names(&cfg.archive_dir),
        vec!["A1.rar", "A2a.rar", "A2b.rar", "A3.rar", "A5.rar", "A6.rar"]
    );
    assert_eq!(
        fs::read_to_string(cfg.archive_dir.join("A2b.rar")).unwrap(),
        "archive-A2b"
    );

    assert_eq!(summary.summaries, 6);
    assert_eq!(summary.details, 5);
    assert_eq!(summary.images.written, 6);
    assert_eq!(summary.archives.written, 6);
    assert_eq!(failures.len(), 1);
    match &failures[0] {
        ItemFailure::Detail { id, title, reason, .. } => {
            assert_eq!(*id, 4);
            assert_eq!(title, "Title 4");
            assert_eq!(reason, "HTTP 500");
        }
        other => panic!("unexpected failure: {other:?}"),
    }

    let list_requests: Vec<String> = server
        .requests()
        .into_iter()
        .filter(|r| r.starts_with("/dev-api/list"))
        .collect();
    assert_eq!(
        list_requests,
        vec![
            "/dev-api/list?page_size=3&page=1",
            "/dev-api/list?page_size=3&page=2"
        ]
    );
    assert!(!server.requests().iter().any(|r| r == "/files/bt/A4.rar"));
}

#[test]
fn missing_asset_is_skipped_and_not_written() {
    let server = StubServer::start();
    serve_catalog(&server);
    server.respond("/img/3.jpg", 404, "gone");
    let out = tempdir().unwrap();
    let cfg = config(&server, out.path());
    let fetcher = CurlFetcher::new(cfg.http.clone());
    let mut failures: Vec<ItemFailure> = Vec::new();

    let summary = pipeline::run(&cfg, &fetcher, &mut failures).expect("run");

    assert_eq!(summary.images.written, 5);
    assert_eq!(summary.images.failed, 1);
    assert!(!cfg.image_dir.join("3.jpg").exists());
    assert!(failures.iter().any(|f| matches!(
        f,
        ItemFailure::Asset { owner_id: 3, url, .. } if url.ends_with("/img/3.jpg")
    )));
}

#[test]
fn failed_page_aborts_run_without_snapshot() {
    let server = StubServer::start();
    serve_catalog(&server);
    server.respond("/dev-api/list?page_size=3&page=2", 500, "down");
    let out = tempdir().unwrap();
    let cfg = config(&server, out.path());
    let fetcher = CurlFetcher::new(cfg.http.clone());
    let mut failures: Vec<ItemFailure> = Vec::new();

    let err = pipeline::run(&cfg, &fetcher, &mut failures).unwrap_err();

    assert!(matches!(err, PipelineError::CatalogPage { page: 2, .. }));
    assert!(!cfg.list_snapshot_path.exists());
    assert!(!cfg.image_dir.exists());
    assert!(server.requests().iter().all(|r| r.starts_with("/dev-api/list")));
}

#[test]
fn unreachable_host_is_a_fatal_catalog_error() {
    let out = tempdir().unwrap();
    let cfg = CdlConfig {
        list_endpoint: "http://127.0.0.1:9/list".to_string(),
        page_count: 1,
        list_snapshot_path: out.path().join("list.json"),
        ..CdlConfig::default()
    };
    let fetcher = CurlFetcher::new(cfg.http.clone());

    let err = pipeline::run(&cfg, &fetcher, &mut Vec::<ItemFailure>::new()).unwrap_err();
    assert!(matches!(err, PipelineError::CatalogPage { page: 1, .. }));
}
