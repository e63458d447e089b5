use camino::{Utf8Path, Utf8PathBuf};
use drawboard::{
    BezierCurve, Canvas, Circle, Color, Line, Point, Polygon, RoundRect, Shape, ShapeEnum, ShapeError, ShapeStyle,
};
use miette::IntoDiagnostic;
use rayon::prelude::*;
use std::f64::consts::{FRAC_PI_4, FRAC_PI_6};
use std::fs;

const WIDTH: u32 = 480;
const HEIGHT: u32 = 320;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  render [out-dir]    Render the demo scenes to PNG (default: target/scenes)");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "render" => {
            let out_dir = match args.get(2) {
                Some(dir) => Utf8PathBuf::from(dir),
                None => workspace_root().join("target/scenes"),
            };
            if let Err(e) = render(&out_dir) {
                eprintln!("{:?}", e);
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

fn workspace_root() -> Utf8PathBuf {
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap_or(manifest_dir).to_owned()
}

/// A named scene: builds its shapes, replays gestures, then draws
struct Scene {
    name: &'static str,
    paint: fn(&mut Canvas) -> Result<(), ShapeError>,
}

const SCENES: &[Scene] = &[
    Scene {
        name: "shapes",
        paint: paint_shapes,
    },
    Scene {
        name: "editing",
        paint: paint_editing,
    },
    Scene {
        name: "moved",
        paint: paint_moved,
    },
    Scene {
        name: "rotated",
        paint: paint_rotated,
    },
    Scene {
        name: "round-rect-debug",
        paint: paint_round_rect_debug,
    },
];

fn render(out_dir: &Utf8Path) -> miette::Result<()> {
    fs::create_dir_all(out_dir).into_diagnostic()?;

    let written: Vec<Utf8PathBuf> = SCENES
        .par_iter()
        .map(|scene| -> miette::Result<Utf8PathBuf> {
            let mut canvas = Canvas::new(WIDTH, HEIGHT)?;
            canvas.clear(Color::WHITE);
            (scene.paint)(&mut canvas)?;
            let path = out_dir.join(format!("{}.png", scene.name));
            canvas.save_png(&path)?;
            Ok(path)
        })
        .collect::<miette::Result<_>>()?;

    for path in &written {
        eprintln!("Wrote {}", path);
    }
    Ok(())
}

fn demo_shapes() -> Result<Vec<ShapeEnum>, ShapeError> {
    let filled = ShapeStyle::new().filled(true);
    let polygon = Polygon::new(Point::new(280.0, 90.0), 50.0, 6, 0.0)?.with_style(filled.with_fill("#add8e6".parse()?));
    Ok(vec![
        Line::new(Point::new(30.0, 40.0), Point::new(150.0, 120.0)).into(),
        Circle::new(Point::new(400.0, 90.0), 45.0)
            .with_style(filled.with_fill(Color::rgb(255, 228, 181)))
            .into(),
        polygon.into(),
        RoundRect::new(Point::new(40.0, 190.0), 160.0, 90.0)
            .with_corner_radius(18.0)
            .with_style(filled.with_line_width(2.0))
            .into(),
        BezierCurve::new(
            [Point::new(250.0, 270.0), Point::new(450.0, 270.0)],
            [Point::new(290.0, 160.0), Point::new(410.0, 330.0)],
        )
        .with_style(ShapeStyle::new().with_stroke(Color::BLUE).with_line_width(3.0))
        .into(),
    ])
}

fn draw_all(shapes: &[ShapeEnum], canvas: &mut Canvas) {
    for shape in shapes {
        shape.draw(canvas);
    }
}

fn paint_shapes(canvas: &mut Canvas) -> Result<(), ShapeError> {
    draw_all(&demo_shapes()?, canvas);
    Ok(())
}

/// Every shape showing its handles; the circle had its east handle pulled out
fn paint_editing(canvas: &mut Canvas) -> Result<(), ShapeError> {
    let mut shapes = demo_shapes()?;
    for shape in &mut shapes {
        shape.set_editing(true);
    }
    let circle = &mut shapes[1];
    let east = circle.points()[2];
    if circle.pick_control_point(canvas, east).is_some() {
        circle.apply_point_edit(Point::new(east.x + 15.0, east.y + 10.0));
        circle.end_gesture();
    }
    canvas.clear(Color::WHITE);
    draw_all(&shapes, canvas);
    Ok(())
}

/// Each shape grabbed at its center and dragged by the same offset
fn paint_moved(canvas: &mut Canvas) -> Result<(), ShapeError> {
    let mut shapes = demo_shapes()?;
    for shape in &mut shapes {
        let grab = shape.center();
        shape.capture_offsets(grab);
        shape.apply_move(Point::new(grab.x + 20.0, grab.y + 15.0));
        shape.end_gesture();
    }
    draw_all(&shapes, canvas);
    Ok(())
}

/// Rotation drawn live for every shape, then committed
fn paint_rotated(canvas: &mut Canvas) -> Result<(), ShapeError> {
    let mut shapes = demo_shapes()?;
    for shape in &mut shapes {
        shape.rotate(canvas, FRAC_PI_6);
        shape.update_point_after_rotated(None);
    }
    // A rotated round rect keeps its angle while dragged
    let rect = &mut shapes[3];
    let grab = rect.center();
    rect.capture_offsets(grab);
    rect.apply_move(Point::new(grab.x + 30.0, grab.y - 10.0));
    rect.end_gesture();

    canvas.clear(Color::WHITE);
    draw_all(&shapes, canvas);
    Ok(())
}

fn paint_round_rect_debug(canvas: &mut Canvas) -> Result<(), ShapeError> {
    let mut rect = RoundRect::new(Point::new(140.0, 100.0), 200.0, 120.0)
        .with_corner_radius(24.0)
        .with_style(ShapeStyle::new().with_stroke("#888".parse()?))
        .with_debug_overlay(true);
    rect.draw(canvas);
    rect.rotate(canvas, FRAC_PI_4);
    Ok(())
}
