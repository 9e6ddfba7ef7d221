use super::*;
use crate::{
    assets::loader::MemoryImageLoader,
    boundary::{self, ImageBoundary},
    fit::mode::FitMode,
    foundation::{
        core::{Geometry, Point},
        error::FramefitError,
    },
    frame::{self, FrameContent, ImageFrame, sync::set_content_src},
    scene::object::{ImageContent, SceneObject},
};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::new(width, height);
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn src_frame_scene(src: &str) -> (Scene, ObjectId) {
    let mut scene = Scene::new();
    frame::register(&mut scene);
    let frame = ImageFrame::new(FitMode::Contain).with_content(FrameContent::Src(src.to_string()));
    let id = scene
        .add(frame.object("f0", Geometry::new(0.0, 0.0, 200.0, 100.0)))
        .unwrap();
    (scene, id)
}

fn child_of(scene: &Scene, frame_id: &ObjectId) -> Option<ObjectId> {
    scene
        .get(frame_id)
        .and_then(|o| o.shape.as_frame())
        .and_then(|f| f.child_id())
        .cloned()
}

#[test]
fn source_content_attaches_child_after_pump() {
    let (mut scene, f) = src_frame_scene("pic.png");
    assert_eq!(scene.pending_loads().len(), 1);
    assert_eq!(scene.len(), 1);

    let mut loader = MemoryImageLoader::new();
    loader.insert("pic.png", png_bytes(50, 50));
    assert_eq!(scene.pump_loads(&mut loader).unwrap(), 1);
    assert!(scene.pending_loads().is_empty());

    let child = scene.get(&child_of(&scene, &f).unwrap()).unwrap();
    assert_eq!(child.geometry.scale_x, 2.0);
    assert_eq!(child.geometry.scale_y, 2.0);
    assert_eq!(child.geometry.center(), Point::new(100.0, 50.0));
    assert_eq!(child.natural_size(), (50.0, 50.0));
}

#[test]
fn completion_for_removed_owner_is_dropped() {
    let (mut scene, f) = src_frame_scene("pic.png");
    let request = scene.take_pending_load().unwrap();
    assert_eq!(request.owner, f);
    scene.remove(&f).unwrap();

    let applied = scene
        .complete_load(LoadCompletion {
            request: request.clone(),
            result: Ok(LoadedImage {
                src: "pic.png".to_string(),
                width: 10,
                height: 10,
            }),
        })
        .unwrap();
    assert!(!applied);
    assert!(scene.is_empty());

    let failed = scene
        .complete_load(LoadCompletion {
            request,
            result: Err(FramefitError::load("boom")),
        })
        .unwrap();
    assert!(!failed);
}

#[test]
fn failed_load_stops_pump_and_keeps_rest_queued() {
    let (mut scene, f) = src_frame_scene("missing.png");
    scene.request_image(f.clone(), "ok.png", ImageOptions::default());

    let mut loader = MemoryImageLoader::new();
    loader.insert("ok.png", png_bytes(4, 4));
    let err = scene.pump_loads(&mut loader).unwrap_err();
    assert!(matches!(err, FramefitError::Load(_)));
    assert_eq!(scene.pending_loads().len(), 1);
    assert!(child_of(&scene, &f).is_none());

    assert_eq!(scene.pump_loads(&mut loader).unwrap(), 1);
    assert!(child_of(&scene, &f).is_some());
}

#[test]
fn completion_resizes_plain_image_and_boundary() {
    let mut scene = Scene::new();
    boundary::register(&mut scene);
    let img = scene
        .add(SceneObject::image("img", ImageContent::new("", 0.0, 0.0), 10.0, 10.0))
        .unwrap();
    let b = scene
        .add(
            ImageBoundary::new(ImageContent::new("", 0.0, 0.0), FitMode::Fill)
                .object("b", 0.0, 0.0),
        )
        .unwrap();
    let r = scene
        .add(SceneObject::rect("r", Geometry::new(0.0, 0.0, 5.0, 5.0)))
        .unwrap();
    for owner in [&img, &b, &r] {
        scene.request_image(owner.clone(), "pic.png", ImageOptions { pixel_ratio: 2.0 });
    }

    let mut loader = MemoryImageLoader::new();
    loader.insert("pic.png", png_bytes(40, 20));
    assert_eq!(scene.pump_loads(&mut loader).unwrap(), 2);

    let img = scene.get(&img).unwrap();
    assert_eq!((img.geometry.width, img.geometry.height), (20.0, 10.0));
    assert_eq!(img.natural_size(), (20.0, 10.0));
    let Shape::ImageBoundary(boundary) = &scene.get(&b).unwrap().shape else {
        panic!("boundary expected");
    };
    assert_eq!(boundary.content(), ImageContent::new("pic.png", 20.0, 10.0));
    assert_eq!(scene.get(&r).unwrap().geometry.width, 5.0);
}

#[test]
fn take_pending_load_is_fifo() {
    let mut scene = Scene::new();
    scene.request_image("a".into(), "1.png", ImageOptions::default());
    scene.request_image("b".into(), "2.png", ImageOptions::default());
    let srcs: Vec<&str> = scene.pending_loads().iter().map(|p| p.src.as_str()).collect();
    assert_eq!(srcs, vec!["1.png", "2.png"]);
    assert_eq!(scene.take_pending_load().unwrap().owner, ObjectId::from("a"));
    assert_eq!(scene.take_pending_load().unwrap().owner, ObjectId::from("b"));
    assert!(scene.take_pending_load().is_none());
}

#[test]
fn content_src_change_refreshes_existing_child() {
    let mut scene = Scene::new();
    frame::register(&mut scene);
    let frame = ImageFrame::new(FitMode::Contain)
        .with_content(FrameContent::Image(ImageContent::new("old.png", 50.0, 50.0)));
    let f = scene
        .add(frame.object("f0", Geometry::new(0.0, 0.0, 200.0, 100.0)))
        .unwrap();
    let child_id = child_of(&scene, &f).unwrap();

    set_content_src(&mut scene, &f, "new.png", ImageOptions::default()).unwrap();
    let mut loader = MemoryImageLoader::new();
    loader.insert("new.png", png_bytes(100, 100));
    scene.pump_loads(&mut loader).unwrap();

    assert_eq!(child_of(&scene, &f), Some(child_id.clone()));
    assert_eq!(scene.len(), 2);
    let child = scene.get(&child_id).unwrap();
    assert_eq!(child.natural_size(), (100.0, 100.0));
    assert_eq!(child.geometry.scale_x, 1.0);
    let Shape::Image(content) = &child.shape else {
        panic!("image child expected");
    };
    assert_eq!(content.src, "new.png");
}

#[test]
fn content_src_requires_a_frame() {
    let mut scene = Scene::new();
    let r = scene
        .add(SceneObject::rect("r", Geometry::new(0.0, 0.0, 5.0, 5.0)))
        .unwrap();
    assert!(set_content_src(&mut scene, &r, "x.png", ImageOptions::default()).is_err());
    assert!(scene.pending_loads().is_empty());
}
