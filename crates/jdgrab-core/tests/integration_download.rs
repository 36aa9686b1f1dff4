//! Integration test: a product page whose media lives on a local HTTP server,
//! run end to end through the orchestrator and the curl downloader.

mod common;

use chrono::NaiveDate;
use jdgrab_core::config::JdgrabConfig;
use jdgrab_core::download::{CurlDownloader, DownloadRequest, DownloadSubsystem};
use jdgrab_core::http::HttpOptions;
use jdgrab_core::media::MediaOptions;
use jdgrab_core::orchestrator::{Orchestrator, RunEvent};
use jdgrab_core::page::{fetch_page, PageSource};
use std::sync::Arc;
use tempfile::tempdir;
use tokio::sync::mpsc;

const PAGE_URL: &str = "https://item.jd.com/100012043978.html";
const FOLDER: &str = "JD_Product_2024_05_01_14_30_100012043978";

fn test_config() -> JdgrabConfig {
    JdgrabConfig {
        inject_settle_ms: 0,
        message_timeout_secs: 10,
        connect_timeout_secs: 5,
        request_timeout_secs: 10,
        ..Default::default()
    }
}

fn product_page(base: &str) -> String {
    format!(
        r#"<html><head><style>
            .ssd-module.m1 {{ background-image: url("{base}/img/detail-bg.png"); }}
            .ssd-module.m2 {{ background-image: url("{base}/img/missing.png"); }}
        </style></head><body>
        <div id="spec-list">
            <img src="{base}/n5/thumb1.jpg" data-url="img/main1.jpg">
            <img src="{base}/n5/thumb2.jpg" data-url="img/main2.png">
        </div>
        <div id="activity_header"><img src="{base}/img/header.jpg"></div>
        <div id="detail">
            <div class="ssd-module m1"></div>
            <div class="ssd-module m2"></div>
        </div>
        <div id="choose-attr-1">
            <img src="{base}/n5/blank.gif">
            <img src="{base}/n5/red.jpg">
        </div>
        <video id="video-player_html5_api" src="{base}/v/clip.mp4"></video>
        </body></html>"#
    )
}

fn server() -> String {
    common::media_server::start(vec![
        // data-url replaces everything after `imgzone/` in the zoned thumbnail URL.
        ("/imgzone/img/main1.jpg", b"main-one".to_vec()),
        ("/imgzone/img/main2.png", b"main-two".to_vec()),
        ("/img/header.jpg", b"header".to_vec()),
        ("/img/detail-bg.png", b"detail-bg".to_vec()),
        ("/imgzone/red.jpg", b"sku-red".to_vec()),
        ("/v/clip.mp4", b"video-bytes".to_vec()),
    ])
}

#[tokio::test]
async fn full_run_saves_every_category_and_skips_failures() {
    let base = server();
    let download_dir = tempdir().unwrap();
    let cfg = test_config();
    let downloader = CurlDownloader::new(download_dir.path(), HttpOptions::from_config(&cfg));
    let (tx, mut rx) = mpsc::channel(256);
    let orch = Orchestrator::new(cfg, Arc::new(downloader)).with_events(tx);

    let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap();
    let report = orch
        .run_at(
            PAGE_URL,
            PageSource::Markup(product_page(&base)),
            MediaOptions::default(),
            ts,
        )
        .await
        .expect("run");

    // 2 main + header + 2 module backgrounds + 1 sku + 1 video; missing.png is a 404.
    assert_eq!(report.folder, FOLDER);
    assert_eq!(report.attempted, 7);
    assert_eq!(report.succeeded, 6);
    assert_eq!(report.failed, 1);

    let root = download_dir.path().join(FOLDER);
    let read = |rel: &str| std::fs::read(root.join(rel)).unwrap();
    assert_eq!(read("main_images/main_1.jpg"), b"main-one");
    assert_eq!(read("main_images/main_2.png"), b"main-two");
    assert_eq!(read("detail_images/detail_1.jpg"), b"header");
    assert_eq!(read("detail_images/detail_2.png"), b"detail-bg");
    assert!(!root.join("detail_images/detail_3.png").exists());
    assert!(!root.join("detail_images/detail_3.png.part").exists());
    assert_eq!(read("sku_images/sku_1.jpg"), b"sku-red");
    assert_eq!(read("videos/video_1.mp4"), b"video-bytes");

    let mut last_status = None;
    while let Ok(ev) = rx.try_recv() {
        if let RunEvent::Status(s) = ev {
            last_status = Some(s);
        }
    }
    assert_eq!(
        last_status.as_deref(),
        Some("Download complete! Saved 7 files.")
    );
}

#[tokio::test]
async fn second_run_uniquifies_instead_of_overwriting() {
    let base = server();
    let download_dir = tempdir().unwrap();
    let cfg = test_config();
    let downloader = CurlDownloader::new(download_dir.path(), HttpOptions::from_config(&cfg));

    let filename = format!("{FOLDER}/main_images/main_1.jpg");
    let url = format!("{base}/imgzone/img/main1.jpg");
    let first = downloader
        .download(&DownloadRequest::uniquify(&url, &filename))
        .unwrap();
    let second = downloader
        .download(&DownloadRequest::uniquify(&url, &filename))
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(
        second,
        download_dir
            .path()
            .join(FOLDER)
            .join("main_images")
            .join("main_1 (1).jpg")
    );
    assert_eq!(std::fs::read(&second).unwrap(), b"main-one");
}

#[tokio::test]
async fn fetch_page_reads_markup_and_rejects_404() {
    let base = common::media_server::start(vec![(
        "/100012043978.html",
        b"<html><div id=\"spec-list\"></div></html>".to_vec(),
    )]);
    let opts = HttpOptions::from_config(&test_config());

    let page_url = format!("{base}/100012043978.html");
    let html = tokio::task::spawn_blocking({
        let opts = opts.clone();
        move || fetch_page(&page_url, &opts)
    })
    .await
    .unwrap()
    .unwrap();
    assert!(html.contains("spec-list"));

    let missing = format!("{base}/nope.html");
    let err = tokio::task::spawn_blocking(move || fetch_page(&missing, &opts))
        .await
        .unwrap();
    assert!(err.is_err());
}
