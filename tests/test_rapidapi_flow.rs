use axum::Json;
use axum::Router;
use axum::http::HeaderMap;
use axum::http::header::{CONTENT_TYPE, HOST};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use clap::Parser;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::json;
use std::io::Cursor;
use thumbgen::cli::CliOptions;
use thumbgen::config::build_provider;
use thumbgen::imaging::reencode_png;
use thumbgen::prompt::thumbnail_prompt;
use thumbgen::provider::ThumbnailProvider;

fn red_jpeg() -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, Rgb([255, 0, 0])));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .expect("encode jpeg");
    bytes
}

#[tokio::test]
async fn rapidapi_provider_from_cli_produces_png() {
    let router = Router::new()
        .route(
            "/realistic",
            post(|headers: HeaderMap| async move {
                let host = headers
                    .get(HOST)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({"final_result": [{"origin": format!("http://{host}/out.jpg")}]}))
            }),
        )
        .route(
            "/out.jpg",
            get(|| async { ([(CONTENT_TYPE, "image/jpeg")], red_jpeg()).into_response() }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let cli = CliOptions::try_parse_from([
        "thumbgen".to_string(),
        "--provider".to_string(),
        "rapidapi".to_string(),
        "--rapidapi-key".to_string(),
        "test-key".to_string(),
        "--rapidapi-url".to_string(),
        format!("http://{addr}/realistic"),
    ])
    .expect("parse cli");
    let provider = build_provider(&cli)
        .expect("build provider")
        .expect("provider present");

    let bytes = provider
        .generate(&thumbnail_prompt("My Cool Video"))
        .await
        .expect("generate");
    let png = reencode_png(&bytes).expect("reencode");
    let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).expect("decode png");
    assert_eq!((decoded.width(), decoded.height()), (10, 10));
}

#[test]
fn rapidapi_without_key_fails_fast() {
    let cli = CliOptions::try_parse_from(["thumbgen", "--provider", "rapidapi", "--rapidapi-key", ""])
        .expect("parse cli");
    assert!(build_provider(&cli).is_err());
}
