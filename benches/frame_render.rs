//! Single-frame render benchmarks for the heaviest sections.
//! Run: cargo bench
//!
//! Uses a generated flat-color deck and the built-in font, so timings cover
//! compositing and text layout but not font hinting.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use tarot_reel::cards::CatalogCopyWriter;
use tarot_reel::composition::{RenderPlan, RenderRequest, Section};
use tarot_reel::config::Config;
use tarot_reel::scene::Scene;

fn bench_plan(dir: &std::path::Path) -> RenderPlan {
    let deck = dir.join("deck_bench");
    std::fs::create_dir_all(&deck).expect("create deck dir");
    for i in 0..22u8 {
        RgbImage::from_pixel(280, 480, Rgb([i * 10, 60, 140]))
            .save(deck.join(format!("{:02}.png", i)))
            .expect("write face");
    }
    RgbImage::from_pixel(280, 480, Rgb([90, 20, 30])).save(deck.join("back.png")).expect("write back");

    let mut config = Config::default();
    config.video.width = 540;
    config.video.height = 960;
    config.assets.tarot_dir = dir.to_path_buf();
    config.assets.required_faces = 22;
    config.assets.font_fallbacks.clear();
    config.assets.fonts_dir = dir.join("fonts");
    config.assets.backgrounds_dir = dir.join("images");
    config.assets.music_dir = dir.join("music");

    let request = RenderRequest { seed: Some(1), ..Default::default() };
    RenderPlan::resolve(&config, &request, &CatalogCopyWriter).expect("resolve plan")
}

fn bench_sections(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let plan = bench_plan(dir.path());
    let mut scene = Scene::prepare(&plan).expect("prepare scene");

    let mut group = c.benchmark_group("render_frame");
    group.sample_size(30);

    for (section, index) in [
        (Section::Shuffle, 20),
        (Section::ArrangeFaceup, 27),
        (Section::Cards1To3, 0),
        (Section::SegmentTransition, 18),
    ] {
        group.bench_function(format!("540p_{}", section), |b| {
            b.iter(|| black_box(scene.render_frame(section, index, 54)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sections);
criterion_main!(benches);
