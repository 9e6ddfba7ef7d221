use super::*;
use crate::{
    boundary::ImageBoundary,
    fit::mode::FitMode,
    foundation::core::Geometry,
    frame::{self, FrameContent, ImageFrame},
    scene::object::ImageContent,
};

fn translation(op: &DrawOp) -> (f64, f64) {
    let c = op.transform.as_coeffs();
    (c[4], c[5])
}

fn framed_scene() -> Scene {
    let mut scene = Scene::new();
    frame::register(&mut scene);
    scene
        .add(SceneObject::rect("bg", Geometry::new(0.0, 0.0, 10.0, 10.0)))
        .unwrap();
    let frame = ImageFrame::new(FitMode::Contain)
        .with_content(FrameContent::Image(ImageContent::new("a.png", 50.0, 50.0)));
    scene
        .add(frame.object("f0", Geometry::new(0.0, 0.0, 200.0, 100.0)))
        .unwrap();
    scene
}

#[test]
fn ops_follow_painter_order_and_shape_kind() {
    let scene = framed_scene();
    let list = compile_draw_list(&scene, None);
    let kinds: Vec<&DrawKind> = list.ops.iter().map(|op| &op.kind).collect();
    assert_eq!(
        kinds,
        vec![
            &DrawKind::Fill,
            &DrawKind::Stroke,
            &DrawKind::Image {
                src: "a.png".to_string()
            },
        ]
    );
    assert_eq!(list.ops[1].id, ObjectId::from("f0"));
    assert_eq!(translation(&list.ops[2]), (100.0, 50.0));
    assert_eq!(list.ops[2].transform.as_coeffs()[0], 2.0);
    assert_eq!(list.ops[2].local_rect, Rect::new(-25.0, -25.0, 25.0, 25.0));
}

#[test]
fn invisible_objects_are_skipped() {
    let mut scene = framed_scene();
    scene.get_mut(&"bg".into()).unwrap().opacity = 0.0;
    let list = compile_draw_list(&scene, None);
    assert_eq!(list.ops.len(), 2);
    assert!(list.ops.iter().all(|op| op.id.as_str() != "bg"));
}

#[test]
fn boundary_draws_with_clipped_matrix() {
    let mut scene = Scene::new();
    for (id, mode) in [("fill", FitMode::Fill), ("stretch", FitMode::Stretch)] {
        let mut object =
            ImageBoundary::new(ImageContent::new("b.png", 10.0, 10.0), mode).object(id, 50.0, 50.0);
        object.geometry.scale_x = 2.0;
        object.geometry.scale_y = 3.0;
        scene.add(object).unwrap();
    }
    let list = compile_draw_list(&scene, None);

    let fill = list.ops[0].transform.as_coeffs();
    assert_eq!((fill[0], fill[3]), (3.0, 3.0));
    assert_eq!(list.ops[0].effective_scalar, None);

    let stretch = list.ops[1].transform.as_coeffs();
    assert_eq!((stretch[0], stretch[3]), (2.0, 3.0));
    assert_eq!(list.ops[1].effective_scalar, Some(3.0));
}

#[test]
fn unbaked_parent_is_composed_and_baked_parent_ignored() {
    let scene = framed_scene();
    let matrix = Affine::translate((100.0, 0.0));

    let unbaked = compile_draw_list(
        &scene,
        Some(ParentTransform {
            matrix,
            baked: false,
        }),
    );
    assert_eq!(translation(&unbaked.ops[0]), (105.0, 5.0));

    let baked = compile_draw_list(
        &scene,
        Some(ParentTransform {
            matrix,
            baked: true,
        }),
    );
    assert_eq!(translation(&baked.ops[0]), (5.0, 5.0));
}

#[test]
fn draw_list_serializes_to_json() {
    let scene = framed_scene();
    let value = serde_json::to_value(compile_draw_list(&scene, None)).unwrap();
    let ops = value["ops"].as_array().unwrap();
    assert_eq!(ops.len(), 3);
    assert_eq!(ops[0]["kind"]["kind"], "fill");
    assert_eq!(ops[2]["kind"]["kind"], "image");
    assert_eq!(ops[2]["kind"]["src"], "a.png");
    assert_eq!(ops[1]["strokeWidth"], 1.0);
    assert!(ops[0].get("effectiveScalar").is_none());
}
