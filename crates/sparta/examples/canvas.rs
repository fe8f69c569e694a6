//! Properties and the canvas widget.
//!
//! The main window is split into four canvases: a sine curve, two polygons,
//! a few geometric objects and a scrollable poem. Each canvas keeps its
//! drawing data in the `data` property and recomputes it on configure.
//!
//! Use the arrow and page keys, the mouse buttons or the wheel over the
//! poem to scroll it.
//!
//! Run with: cargo run --example canvas

use std::cell::RefCell;
use std::f64::consts::TAU;

use sparta::prelude::*;

const SINE_POINTS: usize = 1000;

const POLYGON: [(i32, i32); 10] = [
    (10, 70),
    (50, 70),
    (50, 10),
    (90, 10),
    (90, 50),
    (30, 50),
    (30, 90),
    (70, 90),
    (70, 30),
    (10, 30),
];

struct Objects {
    frame: Rect,
    diagonals: [Vec<Point>; 2],
}

struct Page {
    pos: usize,
    rows: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut ui = sparta::init_or_exit(Config::from_env());
    let main = MainWindow::new(&mut ui, "main", "Canvas")?;
    let geo = ui.geometry(main).unwrap_or(Rect::ZERO);
    let (w, h) = (geo.dx(), geo.dy());

    let sine = Canvas::new(&mut ui, main, "sine", Rect::new(0, 0, w / 2, h / 2))?;
    ui.set_property(sine, Property::Border, true)?;
    ui.set_property(
        sine,
        Property::Data,
        Value::data(RefCell::new(sine_points(w / 2, h / 2))),
    )?;
    ui.capture(sine, EventType::Configure, |ui, id, event| {
        if let Event::Configure(configure) = event {
            with_data(ui, id, |points: &RefCell<Vec<Point>>| {
                *points.borrow_mut() = sine_points(configure.rect.dx(), configure.rect.dy());
            });
        }
        false
    });
    ui.capture(sine, EventType::Expose, |ui, id, _event| {
        let geo = ui.geometry(id).unwrap_or(Rect::ZERO);
        let Some(points) = with_data(ui, id, |p: &RefCell<Vec<Point>>| p.borrow().clone()) else {
            return false;
        };
        if let Some(canvas) = Canvas::from_id(ui, id) {
            let axis = vec![Point::new(0, geo.dy() / 2), Point::new(geo.dx(), geo.dy() / 2)];
            canvas.draw(ui, &Shape::Lines(axis));
            canvas.draw(ui, &Shape::Lines(points));
        }
        false
    });
    ui.update(sine);

    let polygon = Canvas::new(&mut ui, main, "polygon", Rect::new(w / 2, 0, w, h / 2))?;
    ui.set_property(polygon, Property::Border, true)?;
    ui.set_property(polygon, Property::Background, Rgba::rgb(190, 190, 190))?;
    ui.set_property(polygon, Property::Foreground, Rgba::rgb(90, 90, 90))?;
    ui.set_property(
        polygon,
        Property::Data,
        Value::data(RefCell::new(polygons(w - w / 2, h / 2))),
    )?;
    ui.capture(polygon, EventType::Configure, |ui, id, event| {
        if let Event::Configure(configure) = event {
            with_data(ui, id, |shapes: &RefCell<[Shape; 2]>| {
                *shapes.borrow_mut() = polygons(configure.rect.dx(), configure.rect.dy());
            });
        }
        false
    });
    ui.capture(polygon, EventType::Expose, |ui, id, _event| {
        let Some(shapes) = with_data(ui, id, |s: &RefCell<[Shape; 2]>| s.borrow().clone()) else {
            return false;
        };
        if let Some(canvas) = Canvas::from_id(ui, id) {
            for shape in &shapes {
                canvas.draw(ui, shape);
            }
        }
        false
    });
    ui.update(polygon);

    let objects = Canvas::new(&mut ui, main, "objects", Rect::new(0, h / 2, w / 2, h))?;
    ui.set_property(objects, Property::Border, true)?;
    ui.set_property(
        objects,
        Property::Data,
        Value::data(RefCell::new(layout_objects(w / 2, h - h / 2))),
    )?;
    ui.capture(objects, EventType::Configure, |ui, id, event| {
        if let Event::Configure(configure) = event {
            with_data(ui, id, |objects: &RefCell<Objects>| {
                *objects.borrow_mut() = layout_objects(configure.rect.dx(), configure.rect.dy());
            });
        }
        false
    });
    ui.capture(objects, EventType::Expose, |ui, id, _event| {
        let Some((frame, diagonals)) = with_data(ui, id, |o: &RefCell<Objects>| {
            let o = o.borrow();
            (o.frame, o.diagonals.clone())
        }) else {
            return false;
        };
        let Some(canvas) = Canvas::from_id(ui, id) else {
            return false;
        };
        // Colors set here only last for this expose.
        canvas.set_color(ui, ColorRole::Foreground, Rgba::RED);
        canvas.draw(
            ui,
            &Shape::Rectangle {
                rect: frame,
                fill: false,
            },
        );
        canvas.set_color(ui, ColorRole::Foreground, Rgba::GREEN);
        for line in diagonals {
            canvas.draw(ui, &Shape::Lines(line));
        }
        canvas.set_color(ui, ColorRole::Foreground, Rgba::BLUE);
        canvas.draw(
            ui,
            &Shape::Arc {
                rect: frame,
                angle1: 0.0,
                angle2: TAU,
                fill: true,
            },
        );
        false
    });
    ui.update(objects);

    let poem = Canvas::new(&mut ui, main, "poem", Rect::new(w / 2, h / 2, w, h))?;
    ui.set_property(poem, Property::Border, true)?;
    let rows = ((h - h / 2) / ui.units().height).max(1) as usize;
    ui.set_property(poem, Property::Data, Value::data(RefCell::new(Page { pos: 0, rows })))?;
    ui.capture(poem, EventType::Configure, |ui, id, event| {
        if let Event::Configure(configure) = event {
            let height = ui.units().height;
            with_data(ui, id, |page: &RefCell<Page>| {
                page.borrow_mut().rows = (configure.rect.dy() / height).max(1) as usize;
            });
        }
        false
    });
    ui.capture(poem, EventType::Expose, |ui, id, _event| {
        let geo = ui.geometry(id).unwrap_or(Rect::ZERO);
        let line_height = ui.units().height;
        let Some(pos) = with_data(ui, id, |page: &RefCell<Page>| page.borrow().pos) else {
            return false;
        };
        let Some(canvas) = Canvas::from_id(ui, id) else {
            return false;
        };
        for (i, line) in POEM[pos.min(POEM.len())..].iter().enumerate() {
            let y = i as i32 * line_height + 2;
            if y > geo.dy() {
                break;
            }
            let text = Shape::Text {
                pos: Point::new(2, y),
                text: line.to_string(),
            };
            canvas.draw(ui, &text);
        }
        false
    });
    ui.capture(poem, EventType::Key, |ui, id, event| {
        let Event::Key(key) = event else {
            return true;
        };
        let scroll = match key.key {
            Key::DOWN => Scrolling::Line(1),
            Key::UP => Scrolling::Line(-1),
            Key::PAGE_DOWN => Scrolling::Page(1),
            Key::PAGE_UP => Scrolling::Page(-1),
            _ => return true,
        };
        scroll_page(ui, id, scroll);
        true
    });
    ui.capture(poem, EventType::Mouse, |ui, id, event| {
        let Event::Mouse(mouse) = event else {
            return true;
        };
        match mouse.button {
            MouseButton::LEFT | MouseButton::WHEEL_DOWN => scroll_page(ui, id, Scrolling::Line(1)),
            MouseButton::RIGHT | MouseButton::WHEEL => scroll_page(ui, id, Scrolling::Line(-1)),
            _ => {}
        }
        true
    });
    ui.update(poem);

    // Children keep their quadrant when the window is resized.
    ui.capture(main, EventType::Configure, |ui, id, event| {
        let Event::Configure(configure) = event else {
            return false;
        };
        let (w, h) = (configure.rect.dx(), configure.rect.dy());
        let children = ui
            .property(id, Property::Childs)
            .and_then(|v| v.as_widgets().map(<[WidgetId]>::to_vec))
            .unwrap_or_default();
        for child in children {
            let rect = match ui.name(child) {
                Some("sine") => Rect::new(0, 0, w / 2, h / 2),
                Some("polygon") => Rect::new(w / 2, 0, w, h / 2),
                Some("objects") => Rect::new(0, h / 2, w / 2, h),
                Some("poem") => Rect::new(w / 2, h / 2, w, h),
                _ => continue,
            };
            if let Err(e) = ui.set_property(child, Property::Geometry, rect) {
                tracing::warn!("failed to move {}: {}", child, e);
            }
        }
        false
    });

    ui.run()?;
    Ok(())
}

/// Runs `f` on the canvas data of type `T`, if it has any.
fn with_data<T: 'static, R>(ui: &Ui, id: WidgetId, f: impl FnOnce(&T) -> R) -> Option<R> {
    let value = ui.property(id, Property::Data)?;
    value.downcast_data::<T>().map(f)
}

fn sine_points(width: i32, height: i32) -> Vec<Point> {
    (0..SINE_POINTS)
        .map(|i| {
            let t = TAU * i as f64 / SINE_POINTS as f64;
            Point::new(
                i as i32 * width / SINE_POINTS as i32,
                (height as f64 * (1.0 - t.sin()) / 2.0) as i32,
            )
        })
        .collect()
}

/// An outlined copy of the figure on the left half, a filled one on the
/// right half.
fn polygons(width: i32, height: i32) -> [Shape; 2] {
    let outline: Vec<Point> = POLYGON
        .iter()
        .map(|&(x, y)| Point::new(width * x / 200, height * y / 100))
        .collect();
    let filled = outline
        .iter()
        .map(|&p| p + Point::new(width / 2, 0))
        .collect();
    [
        Shape::Polygon {
            points: outline,
            fill: false,
        },
        Shape::Polygon {
            points: filled,
            fill: true,
        },
    ]
}

fn layout_objects(width: i32, height: i32) -> Objects {
    Objects {
        frame: Rect::new(width / 8, height / 8, 7 * width / 8, 7 * height / 8),
        diagonals: [
            vec![Point::new(0, 0), Point::new(width, height)],
            vec![Point::new(width, 0), Point::new(0, height)],
        ],
    }
}

enum Scrolling {
    Line(i32),
    Page(i32),
}

fn scroll_page(ui: &mut Ui, id: WidgetId, scroll: Scrolling) {
    let moved = with_data(ui, id, |page: &RefCell<Page>| {
        let mut page = page.borrow_mut();
        let last = POEM.len().saturating_sub(page.rows) as i64;
        let step = match scroll {
            Scrolling::Line(n) => n as i64,
            Scrolling::Page(n) => n as i64 * page.rows as i64,
        };
        let pos = (page.pos as i64 + step).clamp(0, last.max(0)) as usize;
        let moved = pos != page.pos;
        page.pos = pos;
        moved
    });
    if moved == Some(true) {
        ui.update(id);
    }
}

static POEM: &[&str] = &[
    "MY good blade carves the casques of men,",
    "My tough lance thrusteth sure,",
    "My strength is as the strength of ten,",
    "Because my heart is pure.",
    "The shattering trumpet shrilleth high,",
    "The hard brands shiver on the steel,",
    "The splinter'd spear-shafts crack and fly,",
    "The horse and rider reel:",
    "They reel, they roll in clanging lists,",
    "And when the tide of combat stands,",
    "Perfume and flowers fall in showers,",
    "That lightly rain from ladies' hands.",
    "How sweet are looks that ladies bend",
    "On whom their favours fall !",
    "For them I battle till the end,",
    "To save from shame and thrall:",
    "But all my heart is drawn above,",
    "My knees are bow'd in crypt and shrine:",
    "I never felt the kiss of love,",
    "Nor maiden's hand in mine.",
    "More bounteous aspects on me beam,",
    "Me mightier transports move and thrill;",
    "So keep I fair thro' faith and prayer",
    "A virgin heart in work and will.",
    "When down the stormy crescent goes,",
    "A light before me swims,",
    "Between dark stems the forest glows,",
    "I hear a noise of hymns:",
    "Then by some secret shrine I ride;",
    "I hear a voice but none are there;",
    "The stalls are void, the doors are wide,",
    "The tapers burning fair.",
    "Fair gleams the snowy altar-cloth,",
    "The silver vessels sparkle clean,",
    "The shrill bell rings, the censer swings,",
    "And solemn chaunts resound between.",
    "Sometimes on lonely mountain-meres",
    "I find a magic bark;",
    "I leap on board: no helmsman steers:",
    "I float till all is dark.",
    "A gentle sound, an awful light !",
    "Three angels bear the holy Grail:",
    "With folded feet, in stoles of white,",
    "On sleeping wings they sail.",
    "Ah, blessed vision! blood of God!",
    "My spirit beats her mortal bars,",
    "As down dark tides the glory slides,",
    "And star-like mingles with the stars.",
    "When on my goodly charger borne",
    "Thro' dreaming towns I go,",
    "The cock crows ere the Christmas morn,",
    "The streets are dumb with snow.",
    "The tempest crackles on the leads,",
    "And, ringing, springs from brand and mail;",
    "But o'er the dark a glory spreads,",
    "And gilds the driving hail.",
    "I leave the plain, I climb the height;",
    "No branchy thicket shelter yields;",
    "But blessed forms in whistling storms",
    "Fly o'er waste fens and windy fields.",
    "A maiden knight--to me is given",
    "Such hope, I know not fear;",
    "I yearn to breathe the airs of heaven",
    "That often meet me here.",
    "I muse on joy that will not cease,",
    "Pure spaces clothed in living beams,",
    "Pure lilies of eternal peace,",
    "Whose odours haunt my dreams;",
    "And, stricken by an angel's hand,",
    "This mortal armour that I wear,",
    "This weight and size, this heart and eyes,",
    "Are touch'd, are turn'd to finest air.",
    "The clouds are broken in the sky,",
    "And thro' the mountain-walls",
    "A rolling organ-harmony",
    "Swells up, and shakes and falls.",
    "Then move the trees, the copses nod,",
    "Wings flutter, voices hover clear:",
    "'O just and faithful knight of God!",
    "Ride on ! the prize is near.'",
    "So pass I hostel, hall, and grange;",
    "By bridge and ford, by park and pale,",
    "All-arm'd I ride, whate'er betide,",
    "Until I find the holy Grail.",
];
